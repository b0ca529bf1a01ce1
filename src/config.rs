use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::range::{DEFAULT_MAX, DEFAULT_MIN};

pub const DEFAULT_API_URL: &str = "https://job-management-interface-backend.onrender.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub cities_file: Option<PathBuf>,
    pub salary_min: i64,
    pub salary_max: i64,
    pub currency: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("JOBBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let cities_file = env::var("JOBBOARD_CITIES").ok().map(PathBuf::from);
        let salary_min = parse_var("JOBBOARD_SALARY_MIN", DEFAULT_MIN)?;
        let salary_max = parse_var("JOBBOARD_SALARY_MAX", DEFAULT_MAX)?;
        let currency = env::var("JOBBOARD_CURRENCY").unwrap_or_else(|_| "₹".to_string());

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            cities_file,
            salary_min,
            salary_max,
            currency,
            data_dir: Self::default_data_dir(),
        })
    }

    fn default_data_dir() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "jobboard") {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        }
    }

    pub fn drafts_path(&self) -> PathBuf {
        self.data_dir.join("drafts.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("jobboard.log")
    }
}

fn parse_var(key: &str, default: i64) -> Result<i64> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be an integer, got '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so everything touching them lives in one test.
    #[test]
    fn test_from_env_defaults_and_overrides() {
        let keys = [
            "JOBBOARD_API_URL",
            "JOBBOARD_CITIES",
            "JOBBOARD_SALARY_MIN",
            "JOBBOARD_SALARY_MAX",
            "JOBBOARD_CURRENCY",
        ];
        let saved: Vec<_> = keys.iter().map(|k| env::var(k).ok()).collect();
        for key in keys {
            unsafe { env::remove_var(key); }
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!((config.salary_min, config.salary_max), (50, 100));
        assert_eq!(config.currency, "₹");
        assert!(config.cities_file.is_none());
        assert!(config.drafts_path().ends_with("drafts.db"));

        unsafe {
            env::set_var("JOBBOARD_API_URL", "http://localhost:8080/");
            env::set_var("JOBBOARD_SALARY_MAX", "250");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.salary_max, 250);

        unsafe { env::set_var("JOBBOARD_SALARY_MIN", "lots"); }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("JOBBOARD_SALARY_MIN"));

        for (key, value) in keys.iter().zip(saved) {
            match value {
                Some(v) => unsafe { env::set_var(key, v) },
                None => unsafe { env::remove_var(key) },
            }
        }
    }
}
