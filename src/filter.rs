use regex::Regex;
use std::sync::OnceLock;

use crate::models::{JobPost, JobType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub title: String,
    pub job_type: Option<JobType>,
    pub location: String,
    // monthly, in thousands
    pub salary: Option<(i64, i64)>,
}

impl JobFilter {
    pub fn matches(&self, job: &JobPost) -> bool {
        if !contains_ci(&job.job_title, &self.title) {
            return false;
        }
        if !contains_ci(&job.location, &self.location) {
            return false;
        }
        if let Some(wanted) = self.job_type {
            if JobType::parse(&job.job_type) != Some(wanted) {
                return false;
            }
        }
        if let Some((low, high)) = self.salary {
            if let Some((job_low, job_high)) = monthly_range_k(job) {
                if job_high < low || job_low > high {
                    return false;
                }
            }
        }
        true
    }

    pub fn apply(&self, jobs: &[JobPost]) -> Vec<usize> {
        jobs.iter()
            .enumerate()
            .filter(|(_, job)| self.matches(job))
            .map(|(i, _)| i)
            .collect()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn parse_amount(text: &str) -> Option<i64> {
    static AMOUNT: OnceLock<Regex> = OnceLock::new();
    let re = AMOUNT.get_or_init(|| Regex::new(r"\d[\d,]*").expect("valid amount pattern"));

    let digits: String = re.find(text)?.as_str().chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}

pub fn monthly_range_k(job: &JobPost) -> Option<(i64, i64)> {
    let to_monthly_k = |annual: i64| annual / 12 / 1000;
    match (parse_amount(&job.min_salary), parse_amount(&job.max_salary)) {
        (Some(min), Some(max)) => Some((to_monthly_k(min.min(max)), to_monthly_k(min.max(max)))),
        (Some(one), None) | (None, Some(one)) => Some((to_monthly_k(one), to_monthly_k(one))),
        (None, None) => None,
    }
}
