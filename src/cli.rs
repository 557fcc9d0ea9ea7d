// src/cli.rs
use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analytics::{filter_directory, filter_experience, EmployeeAnalytics, PersonalStats};
use crate::core::{
    is_session_error, ClientError, ConfigManager, EmsApi, ExperienceApi, ServiceClient,
};
use crate::matching::{match_candidates, CandidateMatch, ResultLimit, SearchFilter};
use crate::session::{Session, SessionStore};
use crate::types::{
    Employee, EmployeeForm, ExperienceQuery, ExperienceRecord, ExperienceRequest,
    ExperienceSummary, ForgotPasswordRequest, LoginRequest, Role,
};
use crate::utils::write_csv;

#[derive(Parser, Debug)]
#[command(name = "ems-portal")]
#[command(about = "Employee management portal client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the gateway base URL
    #[arg(long, global = true)]
    pub gateway: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in to the employee or admin portal
    Login {
        #[arg(long)]
        admin: bool,
        username: String,
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// Reset a password with the security key (username + birth year)
    ForgotPassword {
        security_key: String,
        new_password: String,
    },
    /// Public home page statistics
    Stats,
    /// Own profile and experience breakdown
    Me,
    #[command(subcommand)]
    Employees(EmployeeCommand),
    #[command(subcommand)]
    Experience(ExperienceCommand),
    /// Rank employees against tech stack and company tags
    Search(SearchArgs),
    /// Designation, salary and age breakdowns of the roster
    Analytics {
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommand {
    List {
        #[arg(long)]
        query: Option<String>,
    },
    Show {
        id: i64,
    },
    Add(EmployeeFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    Delete {
        id: i64,
    },
    ResetCredentials {
        id: i64,
    },
}

#[derive(Args, Debug, Default)]
pub struct EmployeeFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub designation: Option<String>,
    #[arg(long)]
    pub salary: Option<f64>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<NaiveDate>,
    /// USER or ADMIN
    #[arg(long)]
    pub role: Option<String>,
}

impl EmployeeFields {
    /// Form for a new employee; name and email are mandatory
    pub fn into_form(self) -> Result<EmployeeForm> {
        let Some(name) = self.name.clone().filter(|n| !n.trim().is_empty()) else {
            bail!("--name is required");
        };
        let Some(email) = self.email.clone().filter(|e| !e.trim().is_empty()) else {
            bail!("--email is required");
        };
        let base = EmployeeForm {
            name,
            email,
            designation: String::new(),
            salary: 0.0,
            birth_date: None,
            role: Role::User,
        };
        Ok(self.apply_to(base))
    }

    /// Overwrite only the fields that were given
    pub fn apply_to(self, mut form: EmployeeForm) -> EmployeeForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(designation) = self.designation {
            form.designation = designation;
        }
        if let Some(salary) = self.salary {
            form.salary = salary;
        }
        if self.birth_date.is_some() {
            form.birth_date = self.birth_date;
        }
        if let Some(role) = self.role {
            form.role = Role::parse(&role);
        }
        form
    }
}

#[derive(Subcommand, Debug)]
pub enum ExperienceCommand {
    List {
        #[arg(long)]
        employee: Option<i64>,
        #[arg(long)]
        query: Option<String>,
    },
    Summary {
        #[arg(long)]
        employee: Option<i64>,
    },
    Add(ExperienceFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: ExperienceFields,
    },
    Delete {
        id: i64,
        #[arg(long)]
        employee: i64,
    },
}

#[derive(Args, Debug)]
pub struct ExperienceFields {
    #[arg(long)]
    pub employee: i64,
    #[arg(long)]
    pub tech: String,
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub years: u32,
}

impl From<ExperienceFields> for ExperienceRequest {
    fn from(fields: ExperienceFields) -> Self {
        Self {
            employee_id: fields.employee,
            tech_stack: fields.tech,
            company: fields.company,
            years: fields.years,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Tech stack tag, repeatable
    #[arg(long = "tech")]
    pub tech: Vec<String>,
    /// Company tag, repeatable
    #[arg(long = "company")]
    pub company: Vec<String>,
    #[arg(long)]
    pub min_years: Option<u32>,
    /// Number of results to show, or `all`
    #[arg(long, default_value = "all")]
    pub limit: ResultLimit,
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl SearchArgs {
    pub fn filter(&self) -> SearchFilter {
        let mut filter = SearchFilter::new();
        for tag in &self.tech {
            filter.add_tech_tag(tag);
        }
        for tag in &self.company {
            filter.add_company_tag(tag);
        }
        filter.min_years = self.min_years;
        filter
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CandidateRow<'a> {
    rank: usize,
    id: i64,
    name: &'a str,
    email: &'a str,
    designation: &'a str,
    match_score: u32,
    total_relevant: f64,
}

#[derive(Debug, Serialize)]
struct BreakdownRow<'a> {
    breakdown: &'a str,
    bucket: &'a str,
    value: String,
}

/// Session-aware access to the gateway's services
struct Portal {
    config: ConfigManager,
    store: SessionStore,
}

impl Portal {
    fn new(config: ConfigManager) -> Self {
        let store = SessionStore::new(config.session_path.clone());
        Self { config, store }
    }

    fn client(&self, base_url: String, session: Option<&Session>) -> Result<ServiceClient> {
        let client = ServiceClient::new(base_url, self.config.gateway.timeout_seconds)?;
        Ok(match session {
            Some(session) => client.with_session(session),
            None => client,
        })
    }

    fn ems(&self, session: Option<&Session>) -> Result<EmsApi> {
        Ok(EmsApi::new(self.client(self.config.ems_url(), session)?))
    }

    fn experience(&self, session: &Session) -> Result<ExperienceApi> {
        Ok(ExperienceApi::new(
            self.client(self.config.experience_url(), Some(session))?,
        ))
    }

    /// Load the stored session and check it against `required`.
    /// `None` admits any logged-in role.
    async fn require_session(&self, required: Option<Role>) -> Result<Session> {
        let session = self.store.load().await?.ok_or(ClientError::NotLoggedIn)?;

        if session.is_expired(Utc::now()) {
            warn!("Stored session has expired");
            self.store.clear().await?;
            return Err(ClientError::Unauthorized.into());
        }

        if let Some(role) = required {
            if !session.can_access(Some(role)) {
                return Err(ClientError::Forbidden { required: role }.into());
            }
        }
        Ok(session)
    }
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    let config = match cli.gateway.as_deref() {
        Some(url) => config.with_gateway_url(url),
        None => config,
    };
    let portal = Portal::new(config);

    let result = run(&portal, cli.command).await;
    if let Err(e) = &result {
        if is_session_error(e) {
            portal.store.clear().await?;
        }
    }
    result
}

async fn run(portal: &Portal, command: Command) -> Result<()> {
    match command {
        Command::Login {
            admin,
            username,
            password,
        } => {
            let role = if admin { Role::Admin } else { Role::User };
            let credentials = LoginRequest { username, password };
            let auth = portal.ems(None)?.login(&credentials, role).await?;

            let session = Session::from(auth);
            portal.store.save(&session).await?;
            println!("✅ Logged in as {} ({})", credentials.username, session.role);
            println!("   Session: {}", portal.store.path().display());
        }

        Command::Logout => {
            portal.store.clear().await?;
            println!("Logged out");
        }

        Command::Whoami => match portal.store.load().await? {
            Some(session) => {
                println!("Role:        {}", session.role);
                match session.employee_id {
                    Some(id) => println!("Employee ID: {}", id),
                    None => println!("Employee ID: -"),
                }
                match session.expires_at() {
                    Some(exp) if session.is_expired(Utc::now()) => {
                        println!("Expired:     {}", exp.format("%Y-%m-%d %H:%M"))
                    }
                    Some(exp) => println!("Expires:     {}", exp.format("%Y-%m-%d %H:%M")),
                    None => println!("Expires:     unknown"),
                }
            }
            None => println!("{}", ClientError::NotLoggedIn),
        },

        Command::ForgotPassword {
            security_key,
            new_password,
        } => {
            let request = ForgotPasswordRequest {
                security_key,
                new_password,
            };
            let message = portal.ems(None)?.forgot_password(&request).await?;
            println!("✅ {}", message);
        }

        Command::Stats => {
            let stats = portal.ems(None)?.public_stats().await?;
            println!("Total employees: {}", stats.total_employees);
            println!("New joinees:     {}", stats.new_joinees);
            println!("Average salary:  {:.2}", stats.avg_salary);
        }

        Command::Me => {
            let session = portal.require_session(Some(Role::User)).await?;
            let ems = portal.ems(Some(&session))?;
            let experience = portal.experience(&session)?;

            let (profile, records) = tokio::try_join!(ems.my_profile(), experience.mine())?;
            print_profile(&profile);
            print_personal_stats(&PersonalStats::compute(&records));
        }

        Command::Employees(command) => run_employees(portal, command).await?,
        Command::Experience(command) => run_experience(portal, command).await?,

        Command::Search(args) => {
            let filter = args.filter();
            if let Err(e) = filter.validate() {
                println!("{}", e.message());
                return Ok(());
            }

            let session = portal.require_session(Some(Role::Admin)).await?;
            let ems = portal.ems(Some(&session))?;
            let experience = portal.experience(&session)?;
            let query = ExperienceQuery::default();

            let (employees, records) =
                tokio::try_join!(ems.list_employees(), experience.filter(&query))?;

            let ranked = match_candidates(&employees, &records, &filter)?;
            let shown = args.limit.apply(&ranked);
            info!("Search matched {} employees", ranked.len());

            print_candidates(shown, ranked.len());
            if let Some(path) = &args.csv {
                export_candidates(path, shown)?;
                println!("Exported {} rows to {}", shown.len(), path.display());
            }
        }

        Command::Analytics { csv } => {
            let session = portal.require_session(Some(Role::Admin)).await?;
            let employees = portal.ems(Some(&session))?.list_employees().await?;

            let analytics = EmployeeAnalytics::compute(&employees);
            print_analytics(&analytics, employees.len());
            if let Some(path) = &csv {
                export_analytics(path, &analytics)?;
                println!("Exported analytics to {}", path.display());
            }
        }
    }

    Ok(())
}

async fn run_employees(portal: &Portal, command: EmployeeCommand) -> Result<()> {
    match command {
        EmployeeCommand::List { query } => {
            let session = portal.require_session(None).await?;
            let employees = portal.ems(Some(&session))?.list_employees().await?;
            let visible = filter_directory(&employees, query.as_deref().unwrap_or(""));
            print_employees(&visible);
        }

        EmployeeCommand::Show { id } => {
            let session = portal.require_session(None).await?;
            let employee = portal.ems(Some(&session))?.get_employee(id).await?;
            print_profile(&employee);
        }

        EmployeeCommand::Add(fields) => {
            let session = portal.require_session(Some(Role::Admin)).await?;
            let form = fields.into_form()?;
            let created = portal.ems(Some(&session))?.create_employee(&form).await?;
            println!("✅ Employee created: {} (ID {})", created.name, created.id);
        }

        EmployeeCommand::Update { id, fields } => {
            let session = portal.require_session(Some(Role::Admin)).await?;
            let ems = portal.ems(Some(&session))?;
            let current = ems.get_employee(id).await?;
            let form = fields.apply_to(EmployeeForm::from(&current));
            let updated = ems.update_employee(id, &form).await?;
            println!("✅ Employee updated: {} (ID {})", updated.name, updated.id);
        }

        EmployeeCommand::Delete { id } => {
            let session = portal.require_session(Some(Role::Admin)).await?;
            portal.ems(Some(&session))?.delete_employee(id).await?;
            println!("✅ Employee {} deleted", id);
        }

        EmployeeCommand::ResetCredentials { id } => {
            let session = portal.require_session(Some(Role::Admin)).await?;
            let message = portal.ems(Some(&session))?.reset_credentials(id).await?;
            println!("✅ {}", message);
        }
    }
    Ok(())
}

async fn run_experience(portal: &Portal, command: ExperienceCommand) -> Result<()> {
    match command {
        ExperienceCommand::List { employee, query } => {
            let required = employee.map(|_| Role::Admin);
            let session = portal.require_session(required).await?;
            let api = portal.experience(&session)?;

            let records = match (employee, session.role) {
                (Some(id), _) => api.for_employee(id).await?,
                (None, Role::Admin) => api.list_all().await?,
                (None, Role::User) => api.mine().await?,
            };
            let visible = filter_experience(&records, query.as_deref().unwrap_or(""));
            print_experience(&visible);
        }

        ExperienceCommand::Summary { employee } => {
            let required = employee.map(|_| Role::Admin);
            let session = portal.require_session(required).await?;
            let api = portal.experience(&session)?;

            let summary = match employee {
                Some(id) => api.summary_for_employee(id).await?,
                None => api.my_summary().await?,
            };
            print_summary(&summary);
        }

        ExperienceCommand::Add(fields) => {
            let session = portal.require_session(Some(Role::Admin)).await?;
            let request = ExperienceRequest::from(fields);
            let created = portal.experience(&session)?.create(&request).await?;
            println!(
                "✅ Experience added: {} at {} (ID {})",
                created.tech_stack, created.company, created.id
            );
        }

        ExperienceCommand::Update { id, fields } => {
            let session = portal.require_session(Some(Role::Admin)).await?;
            let request = ExperienceRequest::from(fields);
            let updated = portal.experience(&session)?.update(id, &request).await?;
            println!("✅ Experience {} updated", updated.id);
        }

        ExperienceCommand::Delete { id, employee } => {
            let session = portal.require_session(Some(Role::Admin)).await?;
            portal.experience(&session)?.delete(id, employee).await?;
            println!("✅ Experience {} deleted", id);
        }
    }
    Ok(())
}

// ===== Output =====

fn print_employees(employees: &[&Employee]) {
    if employees.is_empty() {
        println!("No employees found.");
        return;
    }
    println!(
        "{:<5} {:<25} {:<30} {:<20} {:>12}",
        "ID", "Name", "Email", "Designation", "Salary"
    );
    println!("{}", "-".repeat(96));
    for e in employees {
        println!(
            "{:<5} {:<25} {:<30} {:<20} {:>12.2}",
            e.id, e.name, e.email, e.designation, e.salary
        );
    }
}

fn print_profile(employee: &Employee) {
    println!("ID:          {}", employee.id);
    println!("Name:        {}", employee.name);
    println!("Email:       {}", employee.email);
    println!("Designation: {}", employee.designation);
    println!("Salary:      {:.2}", employee.salary);
    match employee.birth_date {
        Some(date) => println!("Birth date:  {}", date),
        None => println!("Birth date:  -"),
    }
    println!("Role:        {}", employee.role);
}

fn print_experience(records: &[&ExperienceRecord]) {
    if records.is_empty() {
        println!("No experience records found.");
        return;
    }
    println!(
        "{:<5} {:<9} {:<20} {:<25} {:>5}",
        "ID", "Employee", "Tech stack", "Company", "Years"
    );
    println!("{}", "-".repeat(68));
    for r in records {
        println!(
            "{:<5} {:<9} {:<20} {:<25} {:>5}",
            r.id, r.employee_id, r.tech_stack, r.company, r.years
        );
    }
}

fn print_summary(summary: &[ExperienceSummary]) {
    if summary.is_empty() {
        println!("No experience recorded.");
        return;
    }
    for entry in summary {
        println!("{:<20} {:>3} yrs", entry.tech_stack, entry.total_years);
    }
}

fn print_personal_stats(stats: &PersonalStats) {
    println!();
    println!("Total experience: {} yrs", stats.total_years);
    println!("Skills:");
    for (skill, years) in &stats.skills {
        println!("  {:<20} {:>3} yrs", skill, years);
    }
    println!("Companies:");
    for (company, years) in &stats.companies {
        println!("  {:<20} {:>3} yrs", company, years);
    }
}

fn print_candidates(shown: &[CandidateMatch], total: usize) {
    if shown.is_empty() {
        println!("No matching employees.");
        return;
    }
    println!(
        "{:<5} {:<5} {:<25} {:<20} {:>6} {:>9}",
        "Rank", "ID", "Name", "Designation", "Score", "Relevant"
    );
    println!("{}", "-".repeat(75));
    for (rank, c) in shown.iter().enumerate() {
        println!(
            "{:<5} {:<5} {:<25} {:<20} {:>5}% {:>9.1}",
            rank + 1,
            c.employee.id,
            c.employee.name,
            c.employee.designation,
            c.match_score,
            c.total_relevant
        );
    }
    if shown.len() < total {
        println!("Showing {} of {} matches", shown.len(), total);
    }
}

fn print_analytics(analytics: &EmployeeAnalytics, headcount: usize) {
    println!("Employees:      {}", headcount);
    println!("Average salary: {:.0}", analytics.avg_salary);
    println!("Highest salary: {:.0}", analytics.max_salary);
    println!("Unique roles:   {}", analytics.unique_designations);

    println!("\nBy designation:");
    for entry in &analytics.designation {
        println!("  {:<20} {:>5}", entry.name, entry.count);
    }
    println!("\nBy salary:");
    for (band, count) in &analytics.salary {
        println!("  {:<20} {:>5}", band.label(), count);
    }
    println!("\nBy age:");
    for (band, count) in &analytics.age {
        println!("  {:<20} {:>5}", band.label(), count);
    }
}

fn export_candidates(path: &Path, shown: &[CandidateMatch]) -> Result<()> {
    let rows: Vec<CandidateRow> = shown
        .iter()
        .enumerate()
        .map(|(i, c)| CandidateRow {
            rank: i + 1,
            id: c.employee.id,
            name: &c.employee.name,
            email: &c.employee.email,
            designation: &c.employee.designation,
            match_score: c.match_score,
            total_relevant: c.total_relevant,
        })
        .collect();
    write_csv(path, &rows)
}

fn analytics_rows(analytics: &EmployeeAnalytics) -> Vec<BreakdownRow<'_>> {
    let summary = [
        ("avg_salary", format!("{:.0}", analytics.avg_salary)),
        ("max_salary", format!("{:.0}", analytics.max_salary)),
        ("unique_designations", analytics.unique_designations.to_string()),
    ]
    .into_iter()
    .map(|(bucket, value)| BreakdownRow {
        breakdown: "summary",
        bucket,
        value,
    });
    let designation = analytics.designation.iter().map(|e| BreakdownRow {
        breakdown: "designation",
        bucket: &e.name,
        value: e.count.to_string(),
    });
    let salary = analytics.salary.iter().map(|(band, count)| BreakdownRow {
        breakdown: "salary",
        bucket: band.label(),
        value: count.to_string(),
    });
    let age = analytics.age.iter().map(|(band, count)| BreakdownRow {
        breakdown: "age",
        bucket: band.label(),
        value: count.to_string(),
    });
    summary
        .chain(designation)
        .chain(salary)
        .chain(age)
        .collect()
}

fn export_analytics(path: &Path, analytics: &EmployeeAnalytics) -> Result<()> {
    write_csv(path, &analytics_rows(analytics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchError;

    #[test]
    fn test_parse_search_command() {
        let cli = Cli::try_parse_from([
            "ems-portal",
            "search",
            "--tech",
            "Java",
            "--tech",
            "java",
            "--company",
            "Acme",
            "--min-years",
            "4",
            "--limit",
            "5",
        ])
        .unwrap();

        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.limit, ResultLimit::Top(5));

        let filter = args.filter();
        assert_eq!(filter.tech_tags, vec!["Java".to_string()]);
        assert_eq!(filter.company_tags, vec!["Acme".to_string()]);
        assert_eq!(filter.target_years(), 4);
    }

    #[test]
    fn test_search_filter_validation_before_fetch() {
        let args = SearchArgs {
            min_years: Some(5),
            ..SearchArgs::default()
        };
        assert_eq!(args.filter().validate(), Err(MatchError::InvalidFilter));
        assert_eq!(
            SearchArgs::default().filter().validate(),
            Err(MatchError::EmptyFilter)
        );
    }

    #[test]
    fn test_parse_global_gateway_and_admin_login() {
        let cli = Cli::try_parse_from([
            "ems-portal",
            "login",
            "--admin",
            "root",
            "secret",
            "--gateway",
            "http://gw:9999",
        ])
        .unwrap();
        assert_eq!(cli.gateway.as_deref(), Some("http://gw:9999"));
        assert!(matches!(cli.command, Command::Login { admin: true, .. }));
    }

    #[test]
    fn test_employee_fields_update_only_given_values() {
        let current = Employee::new(3, "Asha")
            .with_email("asha@ems.com")
            .with_designation("Engineer")
            .with_salary(60_000.0);
        let fields = EmployeeFields {
            salary: Some(75_000.0),
            role: Some("admin".to_string()),
            ..EmployeeFields::default()
        };

        let form = fields.apply_to(EmployeeForm::from(&current));
        assert_eq!(form.name, "Asha");
        assert_eq!(form.designation, "Engineer");
        assert_eq!(form.salary, 75_000.0);
        assert_eq!(form.role, Role::Admin);
    }

    #[test]
    fn test_new_employee_requires_name_and_email() {
        assert!(EmployeeFields::default().into_form().is_err());

        let form = EmployeeFields {
            name: Some("Bo".to_string()),
            email: Some("bo@ems.com".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1),
            ..EmployeeFields::default()
        }
        .into_form()
        .unwrap();
        assert_eq!(form.role, Role::User);
        assert_eq!(form.birth_date, NaiveDate::from_ymd_opt(1990, 5, 1));
    }

    #[test]
    fn test_candidate_export_is_flat() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("candidates.csv");
        let shown = vec![CandidateMatch {
            employee: Employee::new(7, "Asha").with_email("asha@ems.com"),
            match_score: 80,
            total_relevant: 4.0,
        }];

        export_candidates(&path, &shown).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("rank,id,name,email,designation,matchScore,totalRelevant")
        );
        assert_eq!(lines.next(), Some("1,7,Asha,asha@ems.com,,80,4.0"));
    }

    #[test]
    fn test_analytics_rows_cover_every_breakdown() {
        let employees = vec![Employee::new(1, "Asha")
            .with_designation("Engineer")
            .with_salary(40_000.0)];
        let analytics =
            EmployeeAnalytics::compute_at(&employees, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        let rows = analytics_rows(&analytics);
        assert_eq!(rows.len(), 3 + 1 + 1 + 3);
        assert_eq!(rows[0].bucket, "avg_salary");
        assert_eq!(rows[0].value, "40000");
        assert_eq!(rows[1].value, "40000");
        assert_eq!(rows[2].value, "1");
        assert_eq!(rows[3].bucket, "Engineer");
        assert_eq!(rows[4].bucket, "< 50k");
        assert_eq!(rows[5].breakdown, "age");
    }

    #[test]
    fn test_analytics_export_for_empty_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.csv");
        let analytics =
            EmployeeAnalytics::compute_at(&[], NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        export_analytics(&path, &analytics).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "breakdown,bucket,value");
        assert_eq!(lines[1], "summary,avg_salary,0");
        assert_eq!(lines[2], "summary,max_salary,0");
        assert_eq!(lines[3], "summary,unique_designations,0");
        assert_eq!(lines.len(), 1 + 3 + 3);
    }

    #[tokio::test]
    async fn test_require_session_gates() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigManager::load_from(
            |_: &str| None,
            &dir.path().join("none.yaml"),
        )
        .unwrap();
        config.session_path = dir.path().join("session.json");
        let portal = Portal::new(config);

        let err = portal.require_session(None).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ClientError>(),
            Some(&ClientError::NotLoggedIn)
        );

        let session = Session {
            token: "opaque".to_string(),
            role: Role::User,
            employee_id: Some(2),
        };
        portal.store.save(&session).await.unwrap();

        assert_eq!(portal.require_session(None).await.unwrap(), session);
        let err = portal.require_session(Some(Role::Admin)).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ClientError>(),
            Some(&ClientError::Forbidden {
                required: Role::Admin
            })
        );
    }
}
