use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostingId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostingId::Number(n) => write!(f, "{}", n),
            PostingId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPost {
    #[serde(default)]
    pub id: Option<PostingId>,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub job_type: String, // "Fulltime", "Parttime", "Contract", "Internship"
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub min_salary: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub max_salary: String,
    #[serde(default)]
    pub brand_logo_img_url: String,
    #[serde(default)]
    pub application_deadline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJobPost {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub min_salary: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub max_salary: String,
    #[serde(default)]
    pub brand_logo_img_url: String,
    #[serde(default)]
    pub application_deadline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "Fulltime",
            JobType::PartTime => "Parttime",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "fulltime" => Some(JobType::FullTime),
            "parttime" => Some(JobType::PartTime),
            "contract" => Some(JobType::Contract),
            "internship" => Some(JobType::Internship),
            _ => None,
        }
    }

    pub fn cycle(self, forward: bool) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        let len = Self::ALL.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        Self::ALL[next]
    }
}

// Salary fields arrive as numbers or as free text such as "₹12,00,000".
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_post_accepts_mixed_salary_types() {
        let json = r#"{
            "id": 7,
            "job_title": "Backend Engineer",
            "job_type": "Fulltime",
            "location": "Bengaluru",
            "min_salary": 600000,
            "max_salary": "12,00,000",
            "unknown_field": true
        }"#;
        let job: JobPost = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, Some(PostingId::Number(7)));
        assert_eq!(job.min_salary, "600000");
        assert_eq!(job.max_salary, "12,00,000");
        assert_eq!(job.company_name, "");
    }

    #[test]
    fn test_job_post_string_id_and_null_salary() {
        let json = r#"{"id": "a1b2", "job_title": "Intern", "max_salary": null}"#;
        let job: JobPost = serde_json::from_str(json).unwrap();
        assert_eq!(job.id.unwrap().to_string(), "a1b2");
        assert_eq!(job.max_salary, "");
    }

    #[test]
    fn test_job_type_parse_and_cycle() {
        assert_eq!(JobType::parse("Full-time"), Some(JobType::FullTime));
        assert_eq!(JobType::parse("parttime"), Some(JobType::PartTime));
        assert_eq!(JobType::parse("CONTRACT"), Some(JobType::Contract));
        assert_eq!(JobType::parse("freelance"), None);

        assert_eq!(JobType::FullTime.cycle(true), JobType::PartTime);
        assert_eq!(JobType::Internship.cycle(true), JobType::FullTime);
        assert_eq!(JobType::FullTime.cycle(false), JobType::Internship);
    }
}
