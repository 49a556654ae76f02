use crate::data::DataTable;

/// Tooltip text when either indicator is missing for the clicked country
pub const NO_DATA_TEXT: &str = "No Data in World Bank";

/// Build the tooltip text for a clicked country.
/// Both indicators present: three lines (name, life expectancy, GDP per
/// capita). Either absent: the fixed no-data string. Total for every input.
pub fn format_tooltip(name: &str, code: &str, life_exp: &DataTable, gdp: &DataTable) -> String {
    match (life_exp.get(code), gdp.get(code)) {
        (Some(life), Some(gdp)) => format!(
            "{}:\nLife Expectancy: {} yrs\nGDP per Capita: ${}",
            name,
            format_value(life),
            format_value(gdp)
        ),
        _ => NO_DATA_TEXT.to_string(),
    }
}

/// Format a value with at most two decimal places, trailing zeros trimmed
/// (79.3 -> "79.3", 72.126 -> "72.13", 80.0 -> "80")
pub fn format_value(v: f64) -> String {
    let s = format!("{v:.2}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_indicators_present() {
        let life = DataTable::from_pairs([("USA", 79.3)]);
        let gdp = DataTable::from_pairs([("USA", 54541.7)]);
        assert_eq!(
            format_tooltip("United States", "USA", &life, &gdp),
            "United States:\nLife Expectancy: 79.3 yrs\nGDP per Capita: $54541.7"
        );
    }

    #[test]
    fn test_absent_from_both_tables() {
        let life = DataTable::from_pairs([("USA", 79.3)]);
        let gdp = DataTable::from_pairs([("USA", 54541.7)]);
        assert_eq!(format_tooltip("Atlantis", "ATL", &life, &gdp), NO_DATA_TEXT);
    }

    #[test]
    fn test_absent_from_one_table() {
        let life = DataTable::from_pairs([("CAN", 82.0)]);
        let gdp = DataTable::default();
        assert_eq!(format_tooltip("Canada", "CAN", &life, &gdp), NO_DATA_TEXT);
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(79.3), "79.3");
        assert_eq!(format_value(54541.7), "54541.7");
        assert_eq!(format_value(72.126), "72.13");
        assert_eq!(format_value(80.0), "80");
        assert_eq!(format_value(0.5), "0.5");
    }
}
