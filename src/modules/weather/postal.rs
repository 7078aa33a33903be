//! Offline postcode lookup from a GeoNames postal code dump
//! (https://download.geonames.org/export/zip/), e.g. `AU.txt` or `allCountries.txt`.
//!
//! Each line is tab-separated: country code, postal code, place name, admin name 1, admin code 1,
//! admin name 2, admin code 2, admin name 3, admin code 3, latitude, longitude, accuracy.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct PostalPlace {
    pub place_name: String,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Default)]
struct Accumulator {
    first: Option<PostalPlace>,
    latitude_sum: f64,
    longitude_sum: f64,
    count: u32,
}

/// Postcodes shared by several places resolve to the mean of their coordinates and the name of
/// the first place listed.
#[derive(Debug, Default)]
pub struct PostalDataset {
    places: HashMap<(String, String), PostalPlace>,
}

fn normalize(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_uppercase()
}

impl PostalDataset {
    pub fn load(path: &Path) -> io::Result<PostalDataset> {
        let data = fs::read_to_string(path)?;
        let dataset = PostalDataset::parse(&data);
        info!("Loaded {} postcodes from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn parse(data: &str) -> PostalDataset {
        let mut accumulators: HashMap<(String, String), Accumulator> = HashMap::new();

        for (number, line) in data.lines().enumerate() {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 11 {
                if !line.trim().is_empty() {
                    debug!("Skipping short postal line {}", number + 1);
                }
                continue;
            }
            let (latitude, longitude) = match (fields[9].trim().parse::<f64>(), fields[10].trim().parse::<f64>()) {
                (Ok(latitude), Ok(longitude)) => (latitude, longitude),
                _ => {
                    debug!("Skipping postal line {} without coordinates", number + 1);
                    continue;
                },
            };

            let key = (normalize(fields[0]), normalize(fields[1]));
            let accumulator = accumulators.entry(key).or_default();
            if accumulator.first.is_none() {
                accumulator.first = Some(PostalPlace {
                    place_name: fields[2].trim().to_string(),
                    region: Some(fields[3].trim().to_string()).filter(|region| !region.is_empty()),
                    latitude,
                    longitude,
                });
            }
            accumulator.latitude_sum += latitude;
            accumulator.longitude_sum += longitude;
            accumulator.count += 1;
        }

        let places = accumulators
            .into_iter()
            .filter_map(|(key, accumulator)| {
                let count = f64::from(accumulator.count);
                let latitude = accumulator.latitude_sum / count;
                let longitude = accumulator.longitude_sum / count;
                accumulator.first.map(|place| (key, PostalPlace { latitude, longitude, ..place }))
            })
            .collect();

        PostalDataset { places }
    }

    pub fn lookup(&self, postcode: &str, country: &str) -> Option<&PostalPlace> {
        self.places.get(&(normalize(country), normalize(postcode)))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }
}
