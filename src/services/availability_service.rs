use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::reservation::{BookedInterval, StayInterval};

pub struct AvailabilityService;

impl AvailabilityService {
    /// Whether two stays share at least one calendar day.
    ///
    /// Both ends are inclusive, so a check-out on the same day as another stay's check-in
    /// is a conflict. This matches `expand_booked_dates`.
    pub fn intervals_overlap(a: &StayInterval, b: &StayInterval) -> bool {
        a.check_in <= b.check_out && a.check_out >= b.check_in
    }

    /// Whether `candidate` collides with any blocking booking. Cancelled bookings are ignored.
    pub fn has_overlap(candidate: &StayInterval, booked: &[BookedInterval]) -> bool {
        booked
            .iter()
            .filter(|booking| booking.status.is_blocking())
            .any(|booking| Self::intervals_overlap(candidate, &booking.interval()))
    }

    /// Every calendar day from check-in to check-out, both included.
    pub fn expand_booked_dates(interval: &StayInterval) -> Vec<NaiveDate> {
        if interval.check_out < interval.check_in {
            return Vec::new();
        }
        interval
            .check_in
            .iter_days()
            .take_while(|day| *day <= interval.check_out)
            .collect()
    }

    /// The set of days a calendar should render as unavailable.
    pub fn booked_dates(booked: &[BookedInterval]) -> BTreeSet<NaiveDate> {
        booked
            .iter()
            .filter(|booking| booking.status.is_blocking())
            .flat_map(|booking| Self::expand_booked_dates(&booking.interval()))
            .collect()
    }

    /// Keep only the bookings that hold their dates.
    pub fn blocking(booked: Vec<BookedInterval>) -> Vec<BookedInterval> {
        booked
            .into_iter()
            .filter(|booking| booking.status.is_blocking())
            .collect()
    }
}
