//! Scripted walkthrough of basic collection operations on an `employees`
//! collection, driven by the `employee-demo` binary.

use std::{fmt::Write, future::Future};

use crate::{
    error::AppResult,
    models::employee::{Employee, NewEmployee},
    repository::Repository,
};

/// Age at which an employee counts as "Major"
pub const MAJORITY_AGE: i32 = 18;

/// Render the employee listing shown after each write step
pub fn format_employees(employees: &[Employee]) -> String {
    let rule = "=".repeat(80);
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule);
    out.push_str("Employees:\n");
    for employee in employees {
        let _ = writeln!(out, "{}", employee);
    }
    let _ = write!(out, "{}", rule);
    out
}

fn step(title: &str) {
    println!("{}", "-".repeat(40));
    println!("{}", title);
}

/// Print the outcome of a step; failures are reported and the walkthrough
/// carries on
fn report<T>(result: AppResult<T>, on_success: impl FnOnce(T), failure: &str) {
    match result {
        Ok(value) => on_success(value),
        Err(e) => eprintln!("{}: {}", failure, e),
    }
}

async fn show_all(repo: &Repository) {
    match repo.employees_list().await {
        Ok(employees) => println!("{}", format_employees(&employees)),
        Err(e) => eprintln!("Error reading employees: {}", e),
    }
}

/// Run every step in order, awaiting `pause` between them
pub async fn run<F, Fut>(repo: &Repository, mut pause: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    report(
        repo.employees_ensure_collection().await,
        |_| {},
        "Error preparing collection",
    );
    pause().await;

    step("Inserting One Document...");
    report(
        repo.employees_insert_one(&NewEmployee::new("Selva", 24)).await,
        |_| println!("Inserted one document."),
        "Error inserting document",
    );
    show_all(repo).await;
    pause().await;

    step("Inserting Multiple Documents...");
    let batch = [NewEmployee::new("Narumugai", 8), NewEmployee::new("Diana", 18)];
    report(
        repo.employees_insert_many(&batch).await,
        |_| println!("Inserted multiple documents."),
        "Error inserting multiple documents",
    );
    show_all(repo).await;
    pause().await;

    step("Reading a Document...");
    report(
        repo.employees_find_by_name("Narumugai").await,
        |found| match found {
            Some(employee) => println!("Document found: {:?}", employee),
            None => println!("Document found: none"),
        },
        "Error reading document",
    );
    pause().await;

    step(&format!("Reading Major Employees (age >= {})", MAJORITY_AGE));
    report(
        repo.employees_find_min_age(MAJORITY_AGE).await,
        |majors| println!("Documents found: {:#?}", majors),
        "Error reading multiple documents",
    );
    pause().await;

    step("Updating One Document...");
    report(
        repo.employees_update_one_by_name("Selva", "Selvakumar", 25).await,
        |_| println!("Updated one document."),
        "Error updating document",
    );
    show_all(repo).await;
    pause().await;

    step("Updating Multiple Documents...");
    let classified = async {
        repo.employees_set_status_min_age(MAJORITY_AGE, "Major").await?;
        repo.employees_set_status_below_age(MAJORITY_AGE, "Minor").await
    }
    .await;
    report(
        classified,
        |_| println!("Updated multiple documents."),
        "Error updating multiple documents",
    );
    show_all(repo).await;
    pause().await;

    step("Deleting One Document...");
    report(
        repo.employees_delete_one_by_name("Selvakumar").await,
        |_| println!("Deleted one document."),
        "Error deleting document",
    );
    show_all(repo).await;
    pause().await;

    step("Deleting Multiple Documents...");
    report(
        repo.employees_delete_below_age(MAJORITY_AGE).await,
        |_| println!("Deleted multiple documents."),
        "Error deleting multiple documents",
    );
    show_all(repo).await;
    pause().await;

    step("Dropping the Collection...");
    report(
        repo.employees_drop_collection().await,
        |_| println!("Collection dropped successfully."),
        "Error dropping collection",
    );
}
