use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Args;

use jobmarket::error::AppError;
use jobmarket::marketplace::applications::ApplicationStatus;
use jobmarket::marketplace::jobs::{
    close_expired, DeadlineFlag, JobAddress, JobDraft, JobSearchFilter, LocationMode, Pagination,
    PayKind, PayRate,
};
use jobmarket::marketplace::parties::{EmployeeId, EmployerId};
use jobmarket::marketplace::reviews::ReviewDraft;

use crate::infra::{
    InMemoryApplicationRepository, InMemoryEmployerDirectory, InMemoryJobRepository,
    InMemoryReviewRepository, InMemorySavedJobRepository, LoggingNotificationPublisher,
};
use crate::routes::{Applications, Board, Reviews};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Page size used for the demo searches
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: u32,
    /// Skip the deadline-sweep portion of the demo
    #[arg(long)]
    pub(crate) skip_sweep: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = Utc::now();

    let jobs = Arc::new(InMemoryJobRepository::default());
    let employers = Arc::new(InMemoryEmployerDirectory::seeded());
    let reviews = Arc::new(InMemoryReviewRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());

    let board = Board::new(jobs.clone(), employers.clone(), reviews.clone());
    let applications = Applications::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(InMemorySavedJobRepository::default()),
        jobs.clone(),
        employers.clone(),
        notifications.clone(),
    );
    let review_service = Reviews::new(reviews, employers, jobs.clone());

    println!("Job marketplace demo");

    let harbor = EmployerId("org-harbor".to_string());
    let mut night_baker = draft("Night Baker", 3600, &harbor);
    night_baker.deadline = DeadlineFlag::Yes;
    night_baker.deadline_date = Some(now - Duration::hours(2));

    let mut posted = Vec::new();
    for (draft, posted_at) in [
        (draft("Line Cook", 4000, &harbor), now),
        (draft("Sous Chef", 5500, &harbor), now),
        (night_baker, now - Duration::days(1)),
    ] {
        match board.post_job(draft, posted_at) {
            Ok(job) => posted.push(job),
            Err(err) => {
                println!("  Posting rejected: {err}");
                return Ok(());
            }
        }
    }
    let cook = posted[0].clone();
    let expiring = posted[2].clone();

    println!(
        "- Posted {} / {} / {} for Harbor Cafe",
        posted[0].title, posted[1].title, posted[2].title
    );

    match review_service.add_review(
        ReviewDraft {
            employee_id: EmployeeId("emp-alumni".to_string()),
            employer_id: harbor.clone(),
            comment: "Reliable schedule, fair kitchen".to_string(),
            rating: 4.5,
            description: "Worked two summers on the line.".to_string(),
        },
        now,
    ) {
        Ok(review) => println!("- Recorded review {} ({} stars)", review.id.0, review.rating),
        Err(err) => println!("- Review rejected: {err}"),
    }

    let pagination = Pagination {
        page: 1,
        limit: args.limit.max(1),
    };

    let page = match board.search(&JobSearchFilter::default(), pagination, now) {
        Ok(page) => page,
        Err(err) => {
            println!("  Search unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "\nOpen-market search: {} jobs across {} page(s)",
        page.jobs.len(),
        page.total_pages
    );
    for row in &page.jobs {
        let rating = row
            .average_review_rating
            .map(|value| format!("{value:.1}"))
            .unwrap_or_else(|| "unrated".to_string());
        println!("  - {} (employer rating {rating})", row.job.title);
    }

    match board.salary_statistics(&JobSearchFilter::default(), pagination, now) {
        Ok(stats) => println!(
            "Median pay across the page: {:.2}/mo = {:.2}/yr = {:.2}/hr",
            stats.average_salary.monthly, stats.average_salary.yearly, stats.average_salary.hourly
        ),
        Err(err) => println!("Salary statistics unavailable: {err}"),
    }

    println!("\nApplication walkthrough");
    let employee = EmployeeId("emp-demo".to_string());
    let application = match applications.apply(&employee, &cook.id, now) {
        Ok(application) => application,
        Err(err) => {
            println!("  Apply rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- {} applied to {} at {} -> employer track '{}'",
        application.employee_id.0,
        application.job_title,
        application.company_name,
        application.employer_status.label()
    );

    match applications.apply(&employee, &cook.id, now) {
        Err(err) => println!("- Second apply rejected as expected: {err}"),
        Ok(_) => println!("- Second apply unexpectedly succeeded"),
    }

    match applications.update_employer_status(&harbor, &application.id, ApplicationStatus::Interviewing)
    {
        Ok(updated) => println!(
            "- Employer moved the application to '{}' (employee track still {})",
            updated.employer_status.label(),
            updated
                .employee_status
                .map(|status| status.label())
                .unwrap_or("unset"),
        ),
        Err(err) => println!("- Employer status update failed: {err}"),
    }

    println!("- Notices dispatched: {}", notifications.events().len());

    if args.skip_sweep {
        return Ok(());
    }

    println!("\nDeadline sweep");
    match close_expired(jobs.as_ref(), now) {
        Ok(summary) => println!(
            "- Examined {}, closed {}, failures {}",
            summary.examined, summary.closed, summary.failures
        ),
        Err(err) => println!("- Sweep failed: {err}"),
    }

    match board.search(&JobSearchFilter::default(), pagination, now) {
        Ok(after) => println!(
            "Post-sweep search: {} jobs (expired '{}' no longer listed)",
            after.jobs.len(),
            expiring.title
        ),
        Err(err) => println!("  Search unavailable: {err}"),
    }

    Ok(())
}

fn draft(title: &str, monthly_pay: u32, employer: &EmployerId) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        location_mode: LocationMode::OnSite,
        employer_id: employer.clone(),
        address: JobAddress {
            city: "Boston".to_string(),
            area: "Back Bay".to_string(),
            pincode: "02116".to_string(),
            street_address: "12 Clarendon St".to_string(),
        },
        job_types: Vec::new(),
        skills: Vec::new(),
        languages: Vec::new(),
        education: Vec::new(),
        pay_type: Some(PayKind::ExactAmount),
        exact_pay: Some(monthly_pay),
        minimum_pay: None,
        maximum_pay: None,
        pay_rate: Some(PayRate::PerMonth),
        deadline: DeadlineFlag::No,
        deadline_date: None,
    }
}
