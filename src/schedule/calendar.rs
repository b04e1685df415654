use super::{ExceptionKind, Schedule};

impl Schedule {
    /// Resolves whether a service runs on the given date. The base
    /// result is the calendar's weekday flag inside the inclusive date
    /// range (false when the service has no calendar at all). Every
    /// exception matching the date is then applied in source order:
    /// Added forces true, Removed forces false, and with duplicates
    /// for the same date the last one processed wins.
    pub fn service_active_on(&self, service_id: &str, date: u32, weekday: usize) -> bool {
        let mut active = false;

        if let Some(calendar) = self.calendar_by_service.get(service_id)
            && date >= calendar.start_date
            && date <= calendar.end_date
            && calendar.weekdays[weekday]
        {
            active = true;
        }

        if let Some(exceptions) = self.exceptions_by_service.get(service_id) {
            for exception in exceptions.iter() {
                if exception.date != date {
                    continue;
                }
                active = match exception.kind {
                    ExceptionKind::Added => true,
                    ExceptionKind::Removed => false,
                };
            }
        }

        active
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Calendar, CalendarException, ExceptionKind, Schedule};
    use std::sync::Arc;

    fn weekday_service(id: &str) -> Calendar {
        Calendar {
            service_id: id.into(),
            weekdays: [true, true, true, true, true, false, false],
            start_date: 20240101,
            end_date: 20241231,
        }
    }

    fn schedule_with(
        calendar: Option<Calendar>,
        exceptions: Vec<CalendarException>,
    ) -> Schedule {
        let mut schedule = Schedule::new();
        if let Some(calendar) = calendar {
            schedule
                .calendar_by_service
                .insert(calendar.service_id.clone(), calendar);
        }
        if !exceptions.is_empty() {
            let id: Arc<str> = "S".into();
            schedule.exceptions_by_service.insert(id, exceptions.into());
        }
        schedule
    }

    #[test]
    fn base_weekday_test() {
        let schedule = schedule_with(Some(weekday_service("S")), vec![]);
        // 2024-06-18 is a Tuesday.
        assert!(schedule.service_active_on("S", 20240618, 1));
        // 2024-06-22 is a Saturday.
        assert!(!schedule.service_active_on("S", 20240622, 5));
    }

    #[test]
    fn date_range_test() {
        let schedule = schedule_with(Some(weekday_service("S")), vec![]);
        // A Monday before the range starts.
        assert!(!schedule.service_active_on("S", 20231225, 0));
        // The range is inclusive on both ends.
        assert!(schedule.service_active_on("S", 20240101, 0));
        assert!(!schedule.service_active_on("S", 20250106, 0));
    }

    #[test]
    fn unknown_service_test() {
        let schedule = schedule_with(None, vec![]);
        assert!(!schedule.service_active_on("S", 20240617, 0));
    }

    #[test]
    fn removed_exception_test() {
        // 2024-06-17 is a Monday the base calendar covers.
        let schedule = schedule_with(
            Some(weekday_service("S")),
            vec![CalendarException {
                date: 20240617,
                kind: ExceptionKind::Removed,
            }],
        );
        assert!(!schedule.service_active_on("S", 20240617, 0));
        // The Monday after is untouched.
        assert!(schedule.service_active_on("S", 20240624, 0));
    }

    #[test]
    fn added_exception_test() {
        // An extra Saturday for a weekday-only service.
        let schedule = schedule_with(
            Some(weekday_service("S")),
            vec![CalendarException {
                date: 20240622,
                kind: ExceptionKind::Added,
            }],
        );
        assert!(schedule.service_active_on("S", 20240622, 5));
    }

    #[test]
    fn added_without_calendar_test() {
        // An exception can activate a service that has no base calendar.
        let schedule = schedule_with(
            None,
            vec![CalendarException {
                date: 20240617,
                kind: ExceptionKind::Added,
            }],
        );
        assert!(schedule.service_active_on("S", 20240617, 0));
    }

    #[test]
    fn duplicate_exceptions_last_wins_test() {
        let schedule = schedule_with(
            Some(weekday_service("S")),
            vec![
                CalendarException {
                    date: 20240617,
                    kind: ExceptionKind::Added,
                },
                CalendarException {
                    date: 20240617,
                    kind: ExceptionKind::Removed,
                },
            ],
        );
        assert!(!schedule.service_active_on("S", 20240617, 0));

        let schedule = schedule_with(
            Some(weekday_service("S")),
            vec![
                CalendarException {
                    date: 20240622,
                    kind: ExceptionKind::Removed,
                },
                CalendarException {
                    date: 20240622,
                    kind: ExceptionKind::Added,
                },
            ],
        );
        assert!(schedule.service_active_on("S", 20240622, 5));
    }
}
