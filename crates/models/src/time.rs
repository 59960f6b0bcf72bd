use chrono::NaiveTime;

/// Parses a wire-format "HH:MM" time into its canonical typed form.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Renders a slot time back to the "HH:MM" display form.
pub fn format_hhmm(value: NaiveTime) -> String {
    value.format("%H:%M").to_string()
}

#[cfg(test)]
mod test {
    use super::{format_hhmm, parse_hhmm};
    use chrono::NaiveTime;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(
            parse_hhmm("10:00"),
            Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
        );
        assert_eq!(
            parse_hhmm(" 09:30 "),
            Some(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
        assert_eq!(parse_hhmm("25:00"), None);
        assert_eq!(parse_hhmm("10am"), None);
        assert_eq!(parse_hhmm(""), None);
    }

    #[test]
    fn test_format_round_trip() {
        let time = NaiveTime::from_hms_opt(14, 5, 0).unwrap();
        assert_eq!(format_hhmm(time), "14:05");
        assert_eq!(parse_hhmm(&format_hhmm(time)), Some(time));
    }
}
