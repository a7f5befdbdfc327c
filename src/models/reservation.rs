//! Reservation entity model
//!
//! This module contains the SeaORM entity model for the reservations table.
//! A reservation books a party of guests at a given time for one customer.
//!
//! Guest count and start time are validated when they are assigned, so an
//! invalid value is reported to the caller before anything reaches the store.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, ActiveValue::NotSet, Set};

use super::{ValidationError, notes_or_empty};

/// Start time layouts accepted in addition to RFC 3339.
const START_AT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Reservation entity: a booking owned by exactly one customer
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    /// Surrogate identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning customer
    pub customer_id: i32,

    /// Party size, always at least 1
    pub num_guests: i32,

    /// When the party is expected
    pub start_at: NaiveDateTime,

    /// Free-text notes, empty string when none were given
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Model {
    /// Start time in display form, e.g. `January 5th 2025, 7:30 pm`
    pub fn formatted_start_at(&self) -> String {
        format_start_at(&self.start_at)
    }
}

impl ActiveModel {
    /// Starts an unsaved reservation for `customer_id` with empty notes.
    ///
    /// Guest count and start time stay unset until assigned.
    pub fn new_reservation(customer_id: i32) -> Self {
        Self {
            id: NotSet,
            customer_id: Set(customer_id),
            num_guests: NotSet,
            start_at: NotSet,
            notes: Set(String::new()),
        }
    }

    /// Assigns the party size, rejecting anything below one guest.
    pub fn set_num_guests(&mut self, num_guests: i32) -> Result<(), ValidationError> {
        if num_guests < 1 {
            return Err(ValidationError::InvalidGuestCount {
                value: num_guests.to_string(),
            });
        }
        self.num_guests = Set(num_guests);
        Ok(())
    }

    /// Parses and assigns the start time, rejecting values that are not a date.
    pub fn set_start_at(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.start_at = Set(parse_start_at(raw)?);
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = Set(notes_or_empty(notes));
    }

    /// Re-checks the invariants that assignment enforces.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.num_guests {
            ActiveValue::Set(n) | ActiveValue::Unchanged(n) if *n < 1 => {
                Err(ValidationError::InvalidGuestCount {
                    value: n.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        self.validate()
            .map_err(|err| DbErr::Custom(err.to_string()))?;
        Ok(self)
    }
}

/// Parses a guest count as submitted by a form.
pub fn parse_num_guests(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidGuestCount {
            value: raw.to_string(),
        })
}

/// Parses a reservation start time.
///
/// Accepts RFC 3339, `YYYY-MM-DD[T ]HH:MM[:SS]` and a bare `YYYY-MM-DD`,
/// which means midnight.
///
/// Start times are restaurant wall-clock times. An RFC 3339 offset is
/// dropped and the time is kept as written, so `19:30+02:00` and `19:30`
/// store the same value.
pub fn parse_start_at(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_local());
    }

    for format in START_AT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ValidationError::InvalidStartAt {
        value: raw.to_string(),
    })
}

/// Formats a start time as `<Month> <day><ordinal> <year>, <h>:<mm> <am|pm>`.
pub fn format_start_at(start_at: &NaiveDateTime) -> String {
    let day = start_at.day();
    format!(
        "{} {}{} {}, {}",
        start_at.format("%B"),
        day,
        ordinal_suffix(day),
        start_at.format("%Y"),
        start_at.format("%-I:%M %P"),
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn guest_count_below_one_is_rejected() {
        let mut reservation = ActiveModel::new_reservation(1);

        for bad in [0, -1, i32::MIN] {
            let err = reservation.set_num_guests(bad).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidGuestCount {
                    value: bad.to_string()
                }
            );
        }
        assert!(reservation.num_guests.is_not_set());
    }

    #[test]
    fn guest_count_of_one_or_more_reads_back_unchanged() {
        let mut reservation = ActiveModel::new_reservation(1);

        for good in [1, 2, 12, i32::MAX] {
            reservation.set_num_guests(good).unwrap();
            assert_eq!(reservation.num_guests, ActiveValue::Set(good));
        }
    }

    #[test]
    fn rejected_guest_count_keeps_previous_value() {
        let mut reservation = ActiveModel::new_reservation(1);
        reservation.set_num_guests(4).unwrap();

        assert!(reservation.set_num_guests(0).is_err());
        assert_eq!(reservation.num_guests, ActiveValue::Set(4));
    }

    #[test]
    fn parse_num_guests_requires_a_whole_number() {
        assert_eq!(parse_num_guests(" 3 ").unwrap(), 3);
        assert!(parse_num_guests("three").is_err());
        assert!(parse_num_guests("2.5").is_err());
        assert!(parse_num_guests("").is_err());
    }

    #[test]
    fn unparseable_start_is_rejected() {
        let mut reservation = ActiveModel::new_reservation(1);

        for bad in ["", "tomorrow", "2025-13-01", "2025-02-30 10:00", "12:30"] {
            let err = reservation.set_start_at(bad).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidStartAt {
                    value: bad.to_string()
                }
            );
        }
        assert!(reservation.start_at.is_not_set());
    }

    #[test]
    fn offset_and_naive_inputs_share_the_wall_clock() {
        let naive = parse_start_at("2025-01-05T19:30").unwrap();
        let west = parse_start_at("2025-01-05T19:30:00-08:00").unwrap();
        let east = parse_start_at("2025-01-05T19:30:00+09:00").unwrap();

        assert_eq!(naive, west);
        assert_eq!(naive, east);
        assert_eq!(format_start_at(&east), "January 5th 2025, 7:30 pm");
    }

    #[test]
    fn accepted_start_formats() {
        let expected = at(2025, 1, 5, 19, 30);

        assert_eq!(parse_start_at("2025-01-05T19:30").unwrap(), expected);
        assert_eq!(parse_start_at("2025-01-05T19:30:00").unwrap(), expected);
        assert_eq!(parse_start_at("2025-01-05 19:30").unwrap(), expected);
        assert_eq!(parse_start_at("2025-01-05 19:30:00").unwrap(), expected);
        assert_eq!(parse_start_at("2025-01-05T19:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_start_at("2025-01-05T19:30:00+02:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_start_at("2025-01-05").unwrap(),
            at(2025, 1, 5, 0, 0)
        );
    }

    #[test]
    fn formats_start_for_display() {
        assert_eq!(
            format_start_at(&at(2025, 1, 5, 19, 30)),
            "January 5th 2025, 7:30 pm"
        );
        assert_eq!(
            format_start_at(&at(2024, 3, 1, 0, 5)),
            "March 1st 2024, 12:05 am"
        );
        assert_eq!(
            format_start_at(&at(2024, 12, 22, 12, 0)),
            "December 22nd 2024, 12:00 pm"
        );
        assert_eq!(
            format_start_at(&at(2023, 7, 13, 9, 45)),
            "July 13th 2023, 9:45 am"
        );
    }

    #[test]
    fn ordinal_suffixes() {
        let suffixes: Vec<_> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 30, 31]
            .into_iter()
            .map(ordinal_suffix)
            .collect();
        assert_eq!(
            suffixes,
            ["st", "nd", "rd", "th", "th", "th", "th", "st", "nd", "rd", "th", "st"]
        );
    }

    #[test]
    fn assigned_start_keeps_displayed_components() {
        let mut reservation = ActiveModel::new_reservation(1);
        reservation.set_start_at("2024-02-29T18:15").unwrap();

        let ActiveValue::Set(start_at) = reservation.start_at else {
            panic!("start_at should be set");
        };
        assert_eq!(
            format_start_at(&start_at),
            format_start_at(&at(2024, 2, 29, 18, 15))
        );
        assert_eq!(format_start_at(&start_at), "February 29th 2024, 6:15 pm");
    }

    #[test]
    fn validate_catches_bypassed_assignment() {
        let mut reservation = ActiveModel::new_reservation(1);
        reservation.num_guests = Set(0);
        assert!(reservation.validate().is_err());

        reservation.num_guests = Set(2);
        assert!(reservation.validate().is_ok());
    }
}
