use karne_core::archive::archive_names;
use karne_core::matching::ParseOutcome;
use karne_core::model::NamingMode;
use karne_core::roster::schema::{Guardian, StudentRecord};

pub fn print_outcome(class: &str, outcome: &ParseOutcome, naming: NamingMode) {
    println!("=== {} ===\n", class);
    println!(
        "  Pages: {}   Found: {}   Missing: {}\n",
        outcome.total_pages,
        outcome.found_count(),
        outcome.missing_count()
    );

    if !outcome.reports.is_empty() {
        let names = archive_names(&outcome.reports, naming);
        let max_name = outcome
            .reports
            .iter()
            .map(|r| r.student_name.chars().count())
            .max()
            .unwrap_or(10);
        let max_file = names.iter().map(|n| n.chars().count()).max().unwrap_or(10);

        for (report, file) in outcome.reports.iter().zip(&names) {
            println!(
                "  p{:<4} {:<name_w$}  {:<file_w$}  \"{}\"",
                report.page_number,
                report.student_name,
                file,
                report.excerpt,
                name_w = max_name,
                file_w = max_file
            );
        }
        println!();
    }

    if !outcome.missing_students.is_empty() {
        println!("  Not found on any page:");
        for name in &outcome.missing_students {
            println!("    {name}");
        }
        println!();
    }

    if outcome.has_duplicates {
        println!("  Warning: some students matched more than one page; check the numbered files.\n");
    }
}

pub fn print_students(class: &str, students: &[StudentRecord]) {
    println!("=== {} ({} students) ===\n", class, students.len());
    if students.is_empty() {
        return;
    }

    let max_name = students
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(10);

    for s in students {
        println!(
            "  {:>6}  {:<width$}{}",
            s.roster_number,
            s.name,
            guardians(s),
            width = max_name
        );
    }
}

fn guardians(student: &StudentRecord) -> String {
    let describe = |label: &str, g: &Option<Guardian>| {
        g.as_ref()
            .filter(|g| !g.name.is_empty())
            .map(|g| format!("{label}: {}", g.name))
    };
    let parts: Vec<String> = [
        describe("mother", &student.mother),
        describe("father", &student.father),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("  ({})", parts.join(", "))
    }
}
