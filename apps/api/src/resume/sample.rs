//! Starter content for a new draft, so the preview is never empty.

use crate::resume::schema::{blank_section, ResumeVariant};
use crate::resume::store::{FieldValue, FormState, Record, SectionState};

fn text(value: &str) -> FieldValue {
    FieldValue::text(value)
}

fn header() -> SectionState {
    SectionState::Single(
        Record::new()
            .with("name", text("JOHN A. HARVARD"))
            .with("address", text("Cambridge, MA"))
            .with("phone", text("(555) 123-4567"))
            .with("email", text("john.harvard@college.edu"))
            .with("linkedin", text("linkedin.com/in/johnharvard"))
            .with("github", text("github.com/johnharvard")),
    )
}

fn education() -> SectionState {
    SectionState::List(vec![Record::new()
        .with("school", text("Harvard University"))
        .with("location", text("Cambridge, MA"))
        .with(
            "degree",
            text("Bachelor of Science in Computer Science, cum laude"),
        )
        .with("date", text("May 2025"))
        .with(
            "details",
            FieldValue::list([
                "GPA: 3.9/4.0",
                "Relevant Coursework: Data Structures, Algorithms, Distributed Systems, Machine Learning, Operating Systems.",
                "Honors: John Harvard Scholar (Top 5%), Dean's List (All Semesters).",
            ]),
        )])
}

fn experience() -> SectionState {
    SectionState::List(vec![
        Record::new()
            .with("company", text("Tech Giant Corp"))
            .with("location", text("San Francisco, CA"))
            .with("role", text("Software Engineering Intern"))
            .with("date", text("May 2024 – Aug 2024"))
            .with(
                "bullets",
                FieldValue::list([
                    "Engineered a scalable microservice using Go and gRPC to handle 50k+ daily requests, reducing latency by 40%.",
                    "Collaborated with cross-functional teams to integrate GraphQL endpoints, enhancing frontend data fetching efficiency.",
                    "Automated deployment pipelines using Docker and Jenkins, cutting deployment time from 20 minutes to 5 minutes.",
                ]),
            ),
        Record::new()
            .with("company", text("StartUp Inc."))
            .with("location", text("Remote"))
            .with("role", text("Full Stack Developer"))
            .with("date", text("June 2023 – Aug 2023"))
            .with(
                "bullets",
                FieldValue::list([
                    "Developed a responsive e-commerce web application using React, Node.js, and PostgreSQL.",
                    "Implemented secure user authentication with OAuth 2.0 and integrated Stripe API for payment processing.",
                    "Optimized database queries, resulting in a 25% improvement in page load speeds for high-traffic product pages.",
                ]),
            ),
    ])
}

fn projects() -> SectionState {
    SectionState::List(vec![Record::new()
        .with("name", text("Algorithmic Trading Bot"))
        .with("tech", text("Python, Pandas, AWS"))
        .with(
            "bullets",
            FieldValue::list([
                "Built a high-frequency trading bot that executes strategies based on real-time market data using WebSockets.",
                "Backtested strategies over 5 years of historical data, achieving a simulated annualized return of 15%.",
                "Deployed on AWS EC2 for continuous uptime and integrated SMS alerts for trade execution notifications.",
            ]),
        )])
}

fn skills() -> SectionState {
    SectionState::Single(
        Record::new()
            .with(
                "languages",
                text("Java, Python, C++, JavaScript (ES6+), TypeScript, SQL, Go"),
            )
            .with(
                "frameworks",
                text("React, Node.js, Express, Spring Boot, Django, Flask"),
            )
            .with(
                "tools",
                text("Git, Docker, Kubernetes, AWS, Linux/Unix, Jenkins, MongoDB"),
            ),
    )
}

/// Example resume restricted to the sections the variant shows.
pub fn sample_state(variant: ResumeVariant) -> FormState {
    variant
        .sections()
        .iter()
        .fold(FormState::new(), |state, def| {
            let section = match def.key {
                "header" => header(),
                "education" => education(),
                "experience" => experience(),
                "projects" => projects(),
                "skills" => skills(),
                _ => blank_section(def),
            };
            state.with_section(def.key, section)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_sample_has_every_section() {
        let state = sample_state(ResumeVariant::Classic);
        for def in ResumeVariant::Classic.sections() {
            assert!(state.section(def.key).is_some(), "missing {}", def.key);
        }
        assert_eq!(state.records("experience").len(), 2);
        assert_eq!(state.records("projects").len(), 1);
    }

    #[test]
    fn test_compact_sample_has_no_projects() {
        let state = sample_state(ResumeVariant::Compact);
        assert!(state.section("projects").is_none());
        assert_eq!(state.records("education").len(), 1);
    }
}
