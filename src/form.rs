use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::cities::CityDataset;
use crate::location::{LocationConfig, LocationPicker};
use crate::models::{JobType, NewJobPost};

pub const DEFAULT_DEADLINE: &str = "2025-07-29 18:30:00.000Z";
const EXPERIENCE_LEVEL: &str = "1-3";
const KNOWN_LOGOS: [&str; 3] = ["amazon", "tesla", "swiggy"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Company,
    JobType,
    Location,
    MinSalary,
    MaxSalary,
    Deadline,
    Description,
}

impl FormField {
    const ORDER: [FormField; 8] = [
        FormField::Title,
        FormField::Company,
        FormField::JobType,
        FormField::Location,
        FormField::MinSalary,
        FormField::MaxSalary,
        FormField::Deadline,
        FormField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Job Title",
            FormField::Company => "Company Name",
            FormField::JobType => "Job Type",
            FormField::Location => "Location",
            FormField::MinSalary => "Min Salary",
            FormField::MaxSalary => "Max Salary",
            FormField::Deadline => "Application Deadline",
            FormField::Description => "Job Description",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Title => "Job Title, Role",
            FormField::Company => "Amazon, Microsoft, Swiggy",
            FormField::JobType => "",
            FormField::Location => "Choose Preferred Location",
            FormField::MinSalary => "₹0",
            FormField::MaxSalary => "₹12,00,000",
            FormField::Deadline => "YYYY-MM-DD",
            FormField::Description => "Please share a description to let the candidate know more about the job role",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }
}

pub struct JobForm {
    pub title: String,
    pub company: String,
    pub job_type: JobType,
    pub location: LocationPicker,
    pub min_salary: String,
    pub max_salary: String,
    pub deadline: String,
    pub description: String,
    pub focus: FormField,
    pub status: Option<StatusMessage>,
    chosen_location: Rc<RefCell<String>>,
}

impl JobForm {
    pub fn new(dataset: Arc<CityDataset>) -> Self {
        Self::with_location(dataset, String::new())
    }

    fn with_location(dataset: Arc<CityDataset>, location: String) -> Self {
        let chosen_location = Rc::new(RefCell::new(location.clone()));
        let sink = Rc::clone(&chosen_location);
        let initial_query = (!location.is_empty()).then_some(location);
        let picker = LocationPicker::new(LocationConfig { dataset, initial_query })
            .on_select(move |city, _region| *sink.borrow_mut() = city.to_string());

        Self {
            title: String::new(),
            company: String::new(),
            job_type: JobType::FullTime,
            location: picker,
            min_salary: String::new(),
            max_salary: String::new(),
            deadline: String::new(),
            description: String::new(),
            focus: FormField::Title,
            status: None,
            chosen_location,
        }
    }

    pub fn from_draft(dataset: Arc<CityDataset>, draft: &NewJobPost) -> Self {
        let mut form = Self::with_location(dataset, draft.location.clone());
        form.title = draft.job_title.clone();
        form.company = draft.company_name.clone();
        form.job_type = JobType::parse(&draft.job_type).unwrap_or(JobType::FullTime);
        form.min_salary = draft.min_salary.clone();
        form.max_salary = draft.max_salary.clone();
        form.description = draft.job_description.clone();
        form.deadline = match draft.application_deadline.as_str() {
            DEFAULT_DEADLINE => String::new(),
            raw => raw.split('T').next().unwrap_or_default().to_string(),
        };
        form.status = Some(StatusMessage::info("Draft loaded successfully."));
        form
    }

    pub fn chosen_location(&self) -> String {
        self.chosen_location.borrow().clone()
    }

    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Company => Some(&mut self.company),
            FormField::MinSalary => Some(&mut self.min_salary),
            FormField::MaxSalary => Some(&mut self.max_salary),
            FormField::Deadline => Some(&mut self.deadline),
            FormField::Description => Some(&mut self.description),
            FormField::JobType | FormField::Location => None,
        }
    }

    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Company => &self.company,
            FormField::JobType => self.job_type.label(),
            FormField::Location => self.location.text(),
            FormField::MinSalary => &self.min_salary,
            FormField::MaxSalary => &self.max_salary,
            FormField::Deadline => &self.deadline,
            FormField::Description => &self.description,
        }
    }

    pub fn to_post(&self) -> Result<NewJobPost> {
        let application_deadline = match self.deadline.trim() {
            "" => DEFAULT_DEADLINE.to_string(),
            raw => {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| anyhow!("Deadline must be a date like 2025-07-29, got '{}'", raw))?;
                format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
            }
        };
        Ok(self.build(application_deadline))
    }

    pub fn to_draft(&self) -> NewJobPost {
        let application_deadline = if self.deadline.trim().is_empty() {
            DEFAULT_DEADLINE.to_string()
        } else {
            self.deadline.clone()
        };
        self.build(application_deadline)
    }

    fn build(&self, application_deadline: String) -> NewJobPost {
        NewJobPost {
            job_title: self.title.clone(),
            company_name: self.company.clone(),
            job_type: self.job_type.as_str().to_string(),
            location: self.chosen_location(),
            experience_level: EXPERIENCE_LEVEL.to_string(),
            job_description: self.description.clone(),
            min_salary: self.min_salary.clone(),
            max_salary: self.max_salary.clone(),
            brand_logo_img_url: brand_logo_key(&self.company).to_string(),
            application_deadline,
        }
    }
}

pub fn brand_logo_key(company: &str) -> &'static str {
    let key = company.trim().to_lowercase();
    KNOWN_LOGOS
        .iter()
        .find(|logo| **logo == key)
        .copied()
        .unwrap_or("default")
}
