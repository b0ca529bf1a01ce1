use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::models::{JobPost, NewJobPost};

const LIST_PATH: &str = "/api/get-job-post";
const CREATE_PATH: &str = "/api/set-job-post";

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    data: Vec<JobPost>,
}

pub struct JobBoardClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl JobBoardClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn fetch_jobs(&self) -> Result<Vec<JobPost>> {
        let url = format!("{}{}", self.base_url, LIST_PATH);
        tracing::info!(%url, "fetching job postings");

        let response = self
            .client
            .get(&url)
            .send()
            .context("Failed to reach job board API")?;

        let status = response.status();
        let body = response.text().context("Failed to read job listing body")?;
        if !status.is_success() {
            return Err(anyhow!("Job board API error ({}): {}", status, body));
        }

        let jobs = parse_listing(&body)?;
        tracing::info!(count = jobs.len(), "fetched job postings");
        Ok(jobs)
    }

    pub fn create_job(&self, post: &NewJobPost) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, CREATE_PATH);
        tracing::info!(%url, title = %post.job_title, "publishing job posting");

        let response = self
            .client
            .post(&url)
            .json(post)
            .send()
            .context("Failed to reach job board API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            tracing::warn!(%status, "job creation rejected");
            return Err(anyhow!("Failed to create job ({}): {}", status, error_text));
        }

        response
            .json()
            .context("Failed to parse job creation response")
    }
}

pub fn parse_listing(body: &str) -> Result<Vec<JobPost>> {
    let parsed: ListingResponse =
        serde_json::from_str(body).context("Failed to parse job listing response")?;
    Ok(parsed.data)
}
