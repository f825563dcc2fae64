use super::date::parse_date;
use super::phrase::{is_closed_phrase, is_open_phrase, month_from_recurring_phrase};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What a single raw admission field turned out to mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldSignal {
    Missing,
    Date(NaiveDate),
    OpenPhrase,
    ClosedPhrase,
    RecurringMonth(u32),
    Unparsable,
}

impl FieldSignal {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            FieldSignal::Date(date) => Some(date),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FieldSignal::Missing => "missing",
            FieldSignal::Date(_) => "date",
            FieldSignal::OpenPhrase => "open phrase",
            FieldSignal::ClosedPhrase => "closed phrase",
            FieldSignal::RecurringMonth(_) => "recurring month",
            FieldSignal::Unparsable => "unparsable",
        }
    }
}

/// Classifies raw field text once, before any window rule looks at it.
///
/// Closed phrases are checked before open ones because "未开放申请" contains
/// the open phrase "开放申请".
pub fn classify(text: Option<&str>) -> FieldSignal {
    let Some(text) = text.map(str::trim).filter(|value| !value.is_empty()) else {
        return FieldSignal::Missing;
    };

    if is_closed_phrase(text) {
        FieldSignal::ClosedPhrase
    } else if is_open_phrase(text) {
        FieldSignal::OpenPhrase
    } else if let Some(month) = month_from_recurring_phrase(text) {
        FieldSignal::RecurringMonth(month)
    } else if let Some(date) = parse_date(text) {
        FieldSignal::Date(date)
    } else {
        FieldSignal::Unparsable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_every_signal() {
        assert_eq!(classify(None), FieldSignal::Missing);
        assert_eq!(classify(Some("  ")), FieldSignal::Missing);
        assert_eq!(classify(Some("暂未开放")), FieldSignal::ClosedPhrase);
        assert_eq!(classify(Some("未开放申请")), FieldSignal::ClosedPhrase);
        assert_eq!(classify(Some("現正接受申請")), FieldSignal::OpenPhrase);
        assert_eq!(classify(Some("每年9月")), FieldSignal::RecurringMonth(9));
        assert_eq!(
            classify(Some("2025年9月1日")),
            FieldSignal::Date(NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date"))
        );
        assert_eq!(classify(Some("请致电学校查询")), FieldSignal::Unparsable);
    }

    #[test]
    fn out_of_range_recurring_month_is_unparsable() {
        assert_eq!(classify(Some("每年13月")), FieldSignal::Unparsable);
    }
}
