//! Testing utilities for the gazetteer workspace
//!
//! Place fixtures keyed by ancestry strings, and raw feed lines for parser
//! and pipeline tests.

#![allow(missing_docs)]

use gaz_place::{AncestryKey, FeatureClass, Place, PlaceBuilder};

fn parse_key(key: &str) -> AncestryKey {
    key.parse()
        .unwrap_or_else(|err| panic!("invalid fixture key {key:?}: {err}"))
}

/// Feature code of the division owning a key of the given specificity
pub fn admin_code_for(specificity: usize) -> String {
    match specificity {
        1 => "PCLI".to_string(),
        n => format!("ADM{}", n - 1),
    }
}

fn admin_builder(id: u32, name: &str, key: &str) -> PlaceBuilder {
    let key = parse_key(key);
    let mut components = key.components();
    let country = components.next().unwrap_or_default().to_string();
    let codes: Vec<String> = components.map(str::to_string).collect();

    Place::builder(id, name)
        .feature(FeatureClass::A, admin_code_for(key.specificity()))
        .country(country)
        .admin_codes(codes)
}

/// Administrative division owning `key` (`"US"` is a country, `"US.CA"` an ADM1)
pub fn admin(id: u32, key: &str) -> Place {
    admin_builder(id, &format!("Division {key}"), key).build()
}

/// Administrative division with an explicit name and population
pub fn named_admin(id: u32, name: &str, key: &str, population: u64) -> Place {
    admin_builder(id, name, key).population(population).build()
}

/// Populated place hanging below `parent_key`
pub fn city(id: u32, name: &str, parent_key: &str) -> Place {
    city_builder(id, name, parent_key).build()
}

/// Populated place builder, for tests that need extra attributes
pub fn city_builder(id: u32, name: &str, parent_key: &str) -> PlaceBuilder {
    let key = parse_key(parent_key);
    let mut components = key.components();
    let country = components.next().unwrap_or_default().to_string();
    let codes: Vec<String> = components.map(str::to_string).collect();

    Place::builder(id, name)
        .feature(FeatureClass::P, "PPL")
        .country(country)
        .admin_codes(codes)
}

/// One row of a GeoNames dump
#[derive(Debug, Clone, Default)]
pub struct GazetteerLine {
    pub id: u32,
    pub name: String,
    pub ascii_name: String,
    pub alternate_names: Vec<String>,
    pub feature_class: String,
    pub feature_code: String,
    pub country: String,
    pub cc2: Vec<String>,
    pub admin_codes: Vec<String>,
    pub population: u64,
}

impl GazetteerLine {
    pub fn new(id: u32, name: &str, class: &str, code: &str, country: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            ascii_name: name.to_string(),
            feature_class: class.to_string(),
            feature_code: code.to_string(),
            country: country.to_string(),
            ..Self::default()
        }
    }

    pub fn admin(mut self, codes: &[&str]) -> Self {
        self.admin_codes = codes.iter().map(|c| (*c).to_string()).collect();
        self
    }

    pub fn alternates(mut self, names: &[&str]) -> Self {
        self.alternate_names = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    pub fn cc2(mut self, codes: &[&str]) -> Self {
        self.cc2 = codes.iter().map(|c| (*c).to_string()).collect();
        self
    }

    pub fn population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    /// Tab-separated line, without trailing newline
    pub fn render(&self) -> String {
        let admin = |i: usize| self.admin_codes.get(i).cloned().unwrap_or_default();
        [
            self.id.to_string(),
            self.name.clone(),
            self.ascii_name.clone(),
            self.alternate_names.join(","),
            "0.0".to_string(),
            "0.0".to_string(),
            self.feature_class.clone(),
            self.feature_code.clone(),
            self.country.clone(),
            self.cc2.join(","),
            admin(0),
            admin(1),
            admin(2),
            admin(3),
            self.population.to_string(),
            String::new(),
            "0".to_string(),
            "UTC".to_string(),
            "2024-01-01".to_string(),
        ]
        .join("\t")
    }
}

/// One row of the alternate-names feed
pub fn alt_name_line(geoname_id: u32, lang: &str, name: &str, preferred: bool, short: bool) -> String {
    let flag = |b: bool| if b { "1" } else { "" };
    format!(
        "0\t{geoname_id}\t{lang}\t{name}\t{}\t{}\t\t",
        flag(preferred),
        flag(short)
    )
}

/// Join rows into a feed file body
pub fn feed<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| format!("{}\n", line.as_ref()))
        .collect()
}
