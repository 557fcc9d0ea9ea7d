use chrono::NaiveDate;
use ems_portal::analytics::{AgeBand, SalaryBand};
use ems_portal::{
    can_access, match_candidates, Employee, EmployeeAnalytics, ExperienceRecord, MatchError,
    ResultLimit, Role, SearchFilter,
};

fn roster() -> Vec<Employee> {
    vec![
        Employee::new(1, "A").with_designation("Engineer"),
        Employee::new(2, "B").with_designation("Engineer"),
        Employee::new(3, "C").with_designation("Architect"),
        Employee::new(4, "D"),
    ]
}

fn history() -> Vec<ExperienceRecord> {
    vec![
        ExperienceRecord::new(1, 1, "Java", "Acme", 3),
        ExperienceRecord::new(2, 2, "Java, Spring", "Globex", 1),
        ExperienceRecord::new(3, 2, "Python", "Acme", 4),
        ExperienceRecord::new(4, 3, "JavaScript", "Initech", 2),
        ExperienceRecord::new(5, 4, "Go", "Acme", 6),
        ExperienceRecord::new(6, 99, "Java", "Acme", 10),
    ]
}

#[test]
fn scenario_a_single_tech_match() {
    let employees = vec![Employee::new(1, "A")];
    let records = vec![ExperienceRecord::new(1, 1, "Java", "Acme", 3)];
    let filter = SearchFilter::new()
        .with_tech_tags(["Java"])
        .with_min_years(2);

    let result = match_candidates(&employees, &records, &filter).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].employee.id, 1);
    assert_eq!(result[0].match_score, 100);
    assert_eq!(result[0].total_relevant, 2.0);
}

#[test]
fn scenario_b_no_tech_match() {
    let employees = vec![Employee::new(1, "A")];
    let records = vec![ExperienceRecord::new(1, 1, "Java", "Acme", 3)];
    let filter = SearchFilter::new().with_tech_tags(["Python"]);

    assert!(match_candidates(&employees, &records, &filter)
        .unwrap()
        .is_empty());
}

#[test]
fn scenario_c_both_dimensions() {
    let employees = vec![Employee::new(1, "A")];
    let records = vec![ExperienceRecord::new(1, 1, "Java", "Acme", 3)];
    let filter = SearchFilter::new()
        .with_tech_tags(["Java"])
        .with_company_tags(["Acme"])
        .with_min_years(3);

    let result = match_candidates(&employees, &records, &filter).unwrap();
    assert_eq!(result[0].match_score, 100);
}

#[test]
fn scenario_d_years_without_tags() {
    let filter = SearchFilter::new().with_min_years(4);
    assert_eq!(
        match_candidates(&roster(), &history(), &filter),
        Err(MatchError::InvalidFilter)
    );
    assert_eq!(
        match_candidates(&roster(), &history(), &SearchFilter::new()),
        Err(MatchError::EmptyFilter)
    );
}

#[test]
fn results_are_ordered_and_bounded() {
    let filter = SearchFilter::new()
        .with_tech_tags(["java"])
        .with_min_years(4);
    let result = match_candidates(&roster(), &history(), &filter).unwrap();

    // "java" also matches "JavaScript"
    let ids: Vec<i64> = result.iter().map(|c| c.employee.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
    assert_eq!(
        result.iter().map(|c| c.match_score).collect::<Vec<_>>(),
        vec![75, 50, 25]
    );
    assert!(result
        .windows(2)
        .all(|pair| pair[0].match_score >= pair[1].match_score));
    assert!(result.iter().all(|c| c.match_score <= 100));
}

#[test]
fn inclusion_requires_every_active_dimension() {
    let filter = SearchFilter::new()
        .with_tech_tags(["java"])
        .with_company_tags(["acme"]);
    let result = match_candidates(&roster(), &history(), &filter).unwrap();

    // Dimensions may be satisfied by different records (employee 2).
    // Employee 3 matches tech only, employee 4 company only, 99 is not on the roster.
    let ids: Vec<i64> = result.iter().map(|c| c.employee.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn tags_ignore_case() {
    let employees = vec![Employee::new(1, "A")];
    let records = vec![ExperienceRecord::new(1, 1, "Java, Spring", "Acme", 1)];
    let filter = SearchFilter::new().with_tech_tags(["java"]);

    assert_eq!(
        match_candidates(&employees, &records, &filter)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn limit_truncates_ranked_list() {
    let filter = SearchFilter::new().with_company_tags(["acme"]);
    let result = match_candidates(&roster(), &history(), &filter).unwrap();
    assert_eq!(result.len(), 3);

    let top: ResultLimit = "2".parse().unwrap();
    assert_eq!(top.apply(&result).len(), 2);
    assert_eq!(ResultLimit::All.apply(&result).len(), 3);
}

#[test]
fn analytics_bucket_boundaries() {
    let employees = vec![
        Employee::new(1, "A")
            .with_salary(50_000.0)
            .with_birth_date(NaiveDate::from_ymd_opt(2001, 6, 1).unwrap()),
        Employee::new(2, "B")
            .with_salary(100_000.0)
            .with_birth_date(NaiveDate::from_ymd_opt(1991, 6, 1).unwrap()),
        Employee::new(3, "C").with_salary(100_001.0),
    ];
    let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let analytics = EmployeeAnalytics::compute_at(&employees, today);

    assert_eq!(
        analytics.salary,
        vec![(SalaryBand::From50kTo100k, 2), (SalaryBand::Over100k, 1)]
    );
    assert_eq!(
        analytics.age,
        vec![
            (AgeBand::Under25, 0),
            (AgeBand::From25To35, 2),
            (AgeBand::Over35, 0),
        ]
    );
    assert_eq!(analytics.designation[0].name, "Unknown");
    assert_eq!(analytics.designation[0].count, 3);
}

#[test]
fn role_policy() {
    assert!(can_access(Role::Admin, Some(Role::Admin)));
    assert!(!can_access(Role::User, Some(Role::Admin)));
    assert!(can_access(Role::User, None));
}

#[test]
fn non_numeric_salaries_count_as_zero() {
    let employees: Vec<Employee> = serde_json::from_str(
        r#"[
            {"id": 1, "name": "A", "salary": "NaN"},
            {"id": 2, "name": "B", "salary": "inf"},
            {"id": 3, "name": "C", "salary": 60000}
        ]"#,
    )
    .unwrap();
    let analytics =
        EmployeeAnalytics::compute_at(&employees, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

    assert_eq!(analytics.avg_salary, 20_000.0);
    assert_eq!(analytics.max_salary, 60_000.0);
    assert_eq!(
        analytics.salary,
        vec![(SalaryBand::Under50k, 2), (SalaryBand::From50kTo100k, 1)]
    );
}
