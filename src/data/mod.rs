use crate::map::{Country, Polygon};
use anyhow::{Context, Result};
use geojson::{feature::Id, GeoJson, Geometry, Value};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Immutable country-code -> value lookup table for one indicator.
/// Absence of a code is the expected "no data" state, not an error.
#[derive(Default)]
pub struct DataTable {
    values: HashMap<String, f64>,
}

impl DataTable {
    pub fn get(&self, code: &str) -> Option<f64> {
        self.values.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

/// Load one World Bank indicator CSV into a lookup table
pub fn load_indicator(path: &Path) -> Result<DataTable> {
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open indicator file {}", path.display()))?;
    read_indicator(file).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse a World Bank export: preamble rows, then a header row containing
/// "Country Code" and four-digit year columns, then one row per country.
/// The stored value is the most recent year with a parseable number; rows
/// with no numeric value at all are skipped (that country has no data).
pub fn read_indicator<R: Read>(reader: R) -> Result<DataTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut code_col: Option<usize> = None;
    let mut year_cols: Vec<usize> = Vec::new();
    let mut values = HashMap::new();

    for record in rdr.records() {
        let record = record?;
        match code_col {
            None => {
                // Still looking for the header row
                if let Some(idx) = record.iter().position(|f| f.trim() == "Country Code") {
                    code_col = Some(idx);
                    year_cols = record
                        .iter()
                        .enumerate()
                        .filter(|(_, f)| {
                            matches!(f.trim().parse::<u32>(), Ok(y) if (1900..2100).contains(&y))
                        })
                        .map(|(i, _)| i)
                        .collect();
                }
            }
            Some(code_idx) => {
                let code = match record.get(code_idx) {
                    Some(c) if !c.trim().is_empty() => c.trim().to_string(),
                    _ => continue,
                };
                let latest = year_cols
                    .iter()
                    .rev()
                    .filter_map(|&i| record.get(i))
                    .find_map(|f| f.trim().parse::<f64>().ok());
                if let Some(value) = latest {
                    values.insert(code, value);
                }
            }
        }
    }

    Ok(DataTable { values })
}

/// Load country polygons from a GeoJSON file
pub fn load_countries(path: &Path) -> Result<Vec<Country>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read country file {}", path.display()))?;
    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(parse_countries(&geojson))
}

/// Extract country shapes from a parsed GeoJSON document.
/// The country code comes from the feature id (countries.geo.json layout),
/// falling back to `id`/`iso_a3` properties; the display name from `name`.
pub fn parse_countries(geojson: &GeoJson) -> Vec<Country> {
    let GeoJson::FeatureCollection(fc) = geojson else {
        return Vec::new();
    };

    let mut countries = Vec::new();
    for feature in &fc.features {
        let props = feature.properties.as_ref();

        let code = match &feature.id {
            Some(Id::String(s)) => Some(s.clone()),
            Some(Id::Number(n)) => Some(n.to_string()),
            None => props
                .and_then(|p| p.get("id").or_else(|| p.get("iso_a3")))
                .and_then(|v| v.as_str())
                .map(str::to_string),
        };
        let Some(code) = code else {
            continue; // nothing to join on
        };

        let name = props
            .and_then(|p| p.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown")
            .to_string();

        let mut polygons = Vec::new();
        if let Some(geometry) = &feature.geometry {
            collect_polygons(geometry, &mut polygons);
        }
        if polygons.is_empty() {
            continue;
        }

        countries.push(Country::new(code, name, polygons));
    }
    countries
}

fn collect_polygons(geometry: &Geometry, polygons: &mut Vec<Polygon>) {
    match &geometry.value {
        Value::Polygon(rings) => {
            polygons.push(convert_rings(rings));
        }
        Value::MultiPolygon(polys) => {
            for rings in polys {
                polygons.push(convert_rings(rings));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_polygons(g, polygons);
            }
        }
        _ => {}
    }
}

fn convert_rings(rings: &[Vec<Vec<f64>>]) -> Polygon {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .filter(|c| c.len() >= 2)
                .map(|c| (c[0], c[1]))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Data Source,World Development Indicators
Last Updated Date,2017-01-01

Country Name,Country Code,Indicator Name,Indicator Code,2013,2014,2015
United States,USA,Life expectancy at birth,SP.DYN.LE00.IN,78.9,79.1,79.3
Aruba,ABW,Life expectancy at birth,SP.DYN.LE00.IN,75.2,,
No Values,NOV,Life expectancy at birth,SP.DYN.LE00.IN,,,
";

    #[test]
    fn test_read_indicator_takes_latest_year() {
        let table = read_indicator(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(table.get("USA"), Some(79.3));
    }

    #[test]
    fn test_read_indicator_falls_back_to_earlier_year() {
        let table = read_indicator(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(table.get("ABW"), Some(75.2));
    }

    #[test]
    fn test_read_indicator_skips_empty_rows() {
        let table = read_indicator(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(table.get("NOV"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_read_indicator_without_header_is_empty() {
        let table = read_indicator("just,some,junk\n1,2,3\n".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    const SAMPLE_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "USA",
                "properties": { "name": "United States of America" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-120,30],[-80,30],[-80,45],[-120,45],[-120,30]]]
                }
            },
            {
                "type": "Feature",
                "id": "FJI",
                "properties": { "name": "Fiji" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[177,-18],[179,-18],[179,-16],[177,-16],[177,-18]]],
                        [[[-180,-18],[-179,-18],[-179,-17],[-180,-17],[-180,-18]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "No Geometry" },
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn test_parse_countries() {
        let geojson: GeoJson = SAMPLE_GEOJSON.parse().unwrap();
        let countries = parse_countries(&geojson);

        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].code, "USA");
        assert_eq!(countries[0].name, "United States of America");
        assert_eq!(countries[0].polygons.len(), 1);
        assert_eq!(countries[1].code, "FJI");
        assert_eq!(countries[1].polygons.len(), 2);
    }

    #[test]
    fn test_parsed_country_is_hit_testable() {
        let geojson: GeoJson = SAMPLE_GEOJSON.parse().unwrap();
        let countries = parse_countries(&geojson);
        let atlas = crate::map::Atlas::from_countries(countries);
        assert_eq!(atlas.hit_test(-100.0, 38.0), Some(0));
        assert_eq!(atlas.hit_test(178.0, -17.0), Some(1));
        assert_eq!(atlas.hit_test(0.0, 0.0), None);
    }
}
