//! Job search over a static listing catalog.
//!
//! There is no live job-board integration; listings are fixed and filtered in
//! memory.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobSearchQuery {
    pub keywords: String,
    pub location: String,
    /// The static catalog carries no experience levels, so this is ignored.
    #[allow(dead_code)]
    pub experience: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    pub posted_date: &'static str,
    pub url: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobListing>,
    pub total: usize,
}

const CATALOG: &[JobListing] = &[
    JobListing {
        title: "Frontend Developer",
        company: "Tech Corp",
        location: "San Francisco, CA",
        description: "We are looking for a skilled Frontend Developer to join our team...",
        posted_date: "2 days ago",
        url: "https://linkedin.com/jobs/123",
        salary: Some("$80,000 - $120,000"),
    },
    JobListing {
        title: "Full Stack Engineer",
        company: "StartupXYZ",
        location: "Remote",
        description: "Join our growing team as a Full Stack Engineer...",
        posted_date: "1 week ago",
        url: "https://linkedin.com/jobs/456",
        salary: Some("$90,000 - $140,000"),
    },
    JobListing {
        title: "Software Developer",
        company: "Enterprise Solutions",
        location: "New York, NY",
        description: "Looking for a Software Developer with experience in...",
        posted_date: "3 days ago",
        url: "https://linkedin.com/jobs/789",
        salary: None,
    },
];

impl JobListing {
    fn matches_keywords(&self, terms: &[String]) -> bool {
        let haystack =
            format!("{} {} {}", self.title, self.company, self.description).to_lowercase();
        terms.iter().all(|term| haystack.contains(term.as_str()))
    }

    fn matches_location(&self, location: &str) -> bool {
        location.is_empty() || self.location.to_lowercase().contains(location)
    }
}

/// Returns catalog listings matching every keyword and the location substring,
/// case-insensitively. Empty filters match everything.
pub fn search_jobs(query: &JobSearchQuery) -> JobSearchResponse {
    let terms: Vec<String> = query
        .keywords
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let location = query.location.trim().to_lowercase();

    let jobs: Vec<JobListing> = CATALOG
        .iter()
        .filter(|job| job.matches_keywords(&terms) && job.matches_location(&location))
        .cloned()
        .collect();

    JobSearchResponse {
        total: jobs.len(),
        jobs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(keywords: &str, location: &str) -> JobSearchQuery {
        JobSearchQuery {
            keywords: keywords.to_string(),
            location: location.to_string(),
            experience: String::new(),
        }
    }

    #[test]
    fn test_empty_query_returns_full_catalog() {
        assert_eq!(search_jobs(&JobSearchQuery::default()).total, CATALOG.len());
    }

    #[test]
    fn test_keyword_filter_is_case_insensitive() {
        let result = search_jobs(&query("FULL stack", ""));
        assert_eq!(result.total, 1);
        assert_eq!(result.jobs[0].company, "StartupXYZ");
    }

    #[test]
    fn test_keywords_match_description() {
        assert_eq!(search_jobs(&query("experience", "")).total, 1);
    }

    #[test]
    fn test_location_filter() {
        let result = search_jobs(&query("", "remote"));
        assert_eq!(result.total, 1);
        assert_eq!(result.jobs[0].title, "Full Stack Engineer");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(search_jobs(&query("cobol", "")).total, 0);
    }

    #[test]
    fn test_listing_without_salary_omits_field() {
        let listing = &CATALOG[2];
        let json = serde_json::to_value(listing).unwrap();
        assert!(json.get("salary").is_none());
        assert_eq!(json["postedDate"], "3 days ago");
    }

    #[test]
    fn test_query_defaults_missing_fields() {
        let q: JobSearchQuery = serde_json::from_str(r#"{"keywords": "rust"}"#).unwrap();
        assert_eq!(q.keywords, "rust");
        assert!(q.location.is_empty());
    }
}
