use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub region: String,
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityDataset {
    regions: Vec<Region>,
}

impl CityDataset {
    pub fn from_pairs<R, C, I>(pairs: I) -> Self
    where
        R: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
        I: IntoIterator<Item = (R, C)>,
    {
        let regions = pairs
            .into_iter()
            .map(|(region, cities)| Region {
                region: region.into(),
                cities: cities.into_iter().map(Into::into).collect(),
            })
            .collect();
        Self { regions }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read city dataset: {}", path.display()))?;
        let regions: Vec<Region> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid city dataset: {}", path.display()))?;
        let dataset = Self { regions };
        tracing::info!(path = %path.display(), cities = dataset.len(), "loaded city dataset");
        Ok(dataset)
    }

    pub fn flatten(&self) -> impl Iterator<Item = (&str, &str)> {
        self.regions.iter().flat_map(|r| {
            r.cities
                .iter()
                .map(move |city| (city.as_str(), r.region.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.regions.iter().map(|r| r.cities.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN.iter().map(|(region, cities)| (*region, cities.iter().copied())))
    }
}

const BUILTIN: &[(&str, &[&str])] = &[
    ("Andhra Pradesh", &["Visakhapatnam", "Vijayawada", "Guntur", "Tirupati", "Nellore"]),
    ("Assam", &["Guwahati", "Dibrugarh", "Silchar"]),
    ("Bihar", &["Patna", "Gaya", "Bhagalpur", "Muzaffarpur"]),
    ("Chandigarh", &["Chandigarh"]),
    ("Chhattisgarh", &["Raipur", "Bhilai", "Bilaspur"]),
    ("Delhi", &["New Delhi", "Delhi"]),
    ("Goa", &["Panaji", "Margao", "Vasco da Gama"]),
    ("Gujarat", &["Ahmedabad", "Surat", "Vadodara", "Rajkot", "Gandhinagar"]),
    ("Haryana", &["Gurugram", "Faridabad", "Panipat", "Ambala"]),
    ("Himachal Pradesh", &["Shimla", "Dharamshala", "Manali"]),
    ("Jammu and Kashmir", &["Srinagar", "Jammu"]),
    ("Jharkhand", &["Ranchi", "Jamshedpur", "Dhanbad"]),
    ("Karnataka", &["Bengaluru", "Mysuru", "Mangaluru", "Hubballi", "Belagavi"]),
    ("Kerala", &["Thiruvananthapuram", "Kochi", "Kozhikode", "Thrissur"]),
    ("Madhya Pradesh", &["Indore", "Bhopal", "Jabalpur", "Gwalior"]),
    ("Maharashtra", &["Mumbai", "Pune", "Nagpur", "Nashik", "Aurangabad", "Thane"]),
    ("Odisha", &["Bhubaneswar", "Cuttack", "Rourkela"]),
    ("Punjab", &["Ludhiana", "Amritsar", "Jalandhar", "Mohali"]),
    ("Rajasthan", &["Jaipur", "Jodhpur", "Udaipur", "Kota", "Ajmer"]),
    ("Tamil Nadu", &["Chennai", "Coimbatore", "Madurai", "Tiruchirappalli", "Salem"]),
    ("Telangana", &["Hyderabad", "Warangal", "Karimnagar"]),
    ("Uttar Pradesh", &["Lucknow", "Kanpur", "Noida", "Ghaziabad", "Agra", "Varanasi"]),
    ("Uttarakhand", &["Dehradun", "Haridwar", "Rishikesh"]),
    ("West Bengal", &["Kolkata", "Howrah", "Durgapur", "Siliguri"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flatten_keeps_dataset_order() {
        let dataset = CityDataset::from_pairs([
            ("Karnataka", vec!["Bengaluru", "Mysuru"]),
            ("Delhi", vec!["New Delhi"]),
        ]);
        let pairs: Vec<_> = dataset.flatten().collect();
        assert_eq!(
            pairs,
            vec![
                ("Bengaluru", "Karnataka"),
                ("Mysuru", "Karnataka"),
                ("New Delhi", "Delhi"),
            ]
        );
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_builtin_is_populated() {
        let dataset = CityDataset::builtin();
        assert!(!dataset.is_empty());
        assert!(dataset.flatten().any(|(city, region)| city == "Mysuru" && region == "Karnataka"));
    }

    #[test]
    fn test_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"region": "Goa", "cities": ["Panaji"]}}, {{"region": "Assam", "cities": []}}]"#
        )
        .unwrap();

        let dataset = CityDataset::load(file.path()).unwrap();
        assert_eq!(dataset.flatten().collect::<Vec<_>>(), vec![("Panaji", "Goa")]);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"Goa\": 1}}").unwrap();
        let err = CityDataset::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid city dataset"));
    }
}
