// src/analytics.rs
//! Dashboard aggregations over employee and experience snapshots

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::types::{Employee, ExperienceRecord};
use crate::utils::{contains_ci, normalize_tag, round_half_up};

const UNKNOWN_DESIGNATION: &str = "Unknown";
const OTHER_STACK: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SalaryBand {
    Under50k,
    From50kTo100k,
    Over100k,
}

impl SalaryBand {
    /// 50000 and 100000 both fall in the middle band.
    pub fn of(salary: f64) -> Self {
        if salary < 50_000.0 {
            SalaryBand::Under50k
        } else if salary <= 100_000.0 {
            SalaryBand::From50kTo100k
        } else {
            SalaryBand::Over100k
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SalaryBand::Under50k => "< 50k",
            SalaryBand::From50kTo100k => "50k - 1L",
            SalaryBand::Over100k => "> 1L",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeBand {
    Under25,
    From25To35,
    Over35,
}

impl AgeBand {
    pub fn of(age: i32) -> Self {
        if age < 25 {
            AgeBand::Under25
        } else if age <= 35 {
            AgeBand::From25To35
        } else {
            AgeBand::Over35
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Under25 => "18-24",
            AgeBand::From25To35 => "25-35",
            AgeBand::Over35 => "36+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAnalytics {
    /// Head count per designation, in first-seen order
    pub designation: Vec<CountEntry>,
    /// Only bands with at least one employee
    pub salary: Vec<(SalaryBand, usize)>,
    /// Always all three bands; employees without a birth date are left out
    pub age: Vec<(AgeBand, usize)>,
    /// Mean salary rounded to a whole unit
    pub avg_salary: f64,
    /// Highest salary, 0 for an empty roster
    pub max_salary: f64,
    pub unique_designations: usize,
}

impl EmployeeAnalytics {
    pub fn compute(employees: &[Employee]) -> Self {
        Self::compute_at(employees, Local::now().date_naive())
    }

    /// Ages are whole calendar years between the birth year and `today`'s year.
    pub fn compute_at(employees: &[Employee], today: NaiveDate) -> Self {
        let mut designation: Vec<CountEntry> = Vec::new();
        let mut salary_counts = [0usize; 3];
        let mut age_counts = [0usize; 3];
        let mut total_salary = 0.0;
        let mut max_salary: f64 = 0.0;

        for employee in employees {
            let name = match employee.designation.trim() {
                "" => UNKNOWN_DESIGNATION,
                other => other,
            };
            match designation.iter_mut().find(|entry| entry.name == name) {
                Some(entry) => entry.count += 1,
                None => designation.push(CountEntry {
                    name: name.to_string(),
                    count: 1,
                }),
            }

            total_salary += employee.salary;
            max_salary = max_salary.max(employee.salary);
            salary_counts[SalaryBand::of(employee.salary) as usize] += 1;

            if let Some(birth_date) = employee.birth_date {
                let age = today.year() - birth_date.year();
                age_counts[AgeBand::of(age) as usize] += 1;
            }
        }

        let salary = [
            SalaryBand::Under50k,
            SalaryBand::From50kTo100k,
            SalaryBand::Over100k,
        ]
        .into_iter()
        .map(|band| (band, salary_counts[band as usize]))
        .filter(|(_, count)| *count > 0)
        .collect();

        let age = [AgeBand::Under25, AgeBand::From25To35, AgeBand::Over35]
            .into_iter()
            .map(|band| (band, age_counts[band as usize]))
            .collect();

        let avg_salary = if employees.is_empty() {
            0.0
        } else {
            round_half_up(total_salary / employees.len() as f64)
        };

        Self {
            unique_designations: designation.len(),
            designation,
            salary,
            age,
            avg_salary,
            max_salary,
        }
    }
}

/// Experience breakdown shown on an employee's own dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalStats {
    /// Years per tech stack, in first-seen order
    pub skills: Vec<(String, u32)>,
    /// One entry per record: company and its years
    pub companies: Vec<(String, u32)>,
    pub total_years: u32,
}

impl PersonalStats {
    pub fn compute(records: &[ExperienceRecord]) -> Self {
        let mut skills: Vec<(String, u32)> = Vec::new();
        let mut total_years = 0;

        for record in records {
            let stack = match record.tech_stack.trim() {
                "" => OTHER_STACK,
                other => other,
            };
            match skills.iter_mut().find(|(name, _)| name == stack) {
                Some((_, years)) => *years += record.years,
                None => skills.push((stack.to_string(), record.years)),
            }
            total_years += record.years;
        }

        let companies = records
            .iter()
            .map(|record| (record.company.clone(), record.years))
            .collect();

        Self {
            skills,
            companies,
            total_years,
        }
    }
}

/// Employees whose name, email or designation contains `query`, ignoring case.
/// A blank query keeps everyone.
pub fn filter_directory<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let Some(needle) = normalize_tag(query) else {
        return employees.iter().collect();
    };
    employees
        .iter()
        .filter(|e| {
            contains_ci(&e.name, &needle)
                || contains_ci(&e.email, &needle)
                || contains_ci(&e.designation, &needle)
        })
        .collect()
}

/// Records whose tech stack or company contains `query`, ignoring case.
pub fn filter_experience<'a>(
    records: &'a [ExperienceRecord],
    query: &str,
) -> Vec<&'a ExperienceRecord> {
    let Some(needle) = normalize_tag(query) else {
        return records.iter().collect();
    };
    records
        .iter()
        .filter(|r| contains_ci(&r.tech_stack, &needle) || contains_ci(&r.company, &needle))
        .collect()
}
