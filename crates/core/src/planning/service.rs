//! Planning stats service - core business logic

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;
use vitraplan_domain::dates::{add_days, date_range_inclusive, local_to_instant};
use vitraplan_domain::{BusinessContext, DailyStats, DayLoadStatus, Result};

use super::capacity::capacity_for_date;
use super::workload::planned_hours_for_date;
use crate::ports::{AbsenceRepository, EmployeeRepository, InterventionRepository};

/// Composes the capacity model and the workload aggregator into the two
/// queries the calendar needs: single-day stats and range stats.
///
/// Both operations are pure functions of freshly fetched inputs - no hidden
/// state, identical inputs produce identical output.
pub struct PlanningService {
    employees: Arc<dyn EmployeeRepository>,
    absences: Arc<dyn AbsenceRepository>,
    interventions: Arc<dyn InterventionRepository>,
}

impl PlanningService {
    /// Create a new planning service.
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        absences: Arc<dyn AbsenceRepository>,
        interventions: Arc<dyn InterventionRepository>,
    ) -> Self {
        Self { employees, absences, interventions }
    }

    /// Planning statistics for a single business-local calendar day.
    pub async fn daily_stats(&self, ctx: &BusinessContext, date: NaiveDate) -> Result<DailyStats> {
        let mut stats = self.range_stats(ctx, date, date).await?;
        stats.remove(&date).ok_or_else(|| {
            vitraplan_domain::VitraError::Internal(format!("range stats missing day {date}"))
        })
    }

    /// Planning statistics for every day of the inclusive `[start, end]`
    /// range. The key set is exactly the calendar dates of the range.
    pub async fn range_stats(
        &self,
        ctx: &BusinessContext,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, DailyStats>> {
        let dates = date_range_inclusive(start, end)?;

        // The three reads are mutually independent; fetch them concurrently.
        let (window_start, window_end) = self.fetch_window(ctx, start, end)?;
        let (employees, absences, interventions) = tokio::try_join!(
            self.employees.list_employees(),
            self.absences.absences_overlapping(start, end),
            self.interventions.interventions_starting_between(window_start, window_end),
        )?;

        debug!(
            %start,
            %end,
            employees = employees.len(),
            absences = absences.len(),
            interventions = interventions.len(),
            "computing range stats"
        );

        let stats = dates
            .into_iter()
            .map(|date| {
                let capacity = capacity_for_date(date, &employees, &absences);
                let planned = planned_hours_for_date(date, &interventions, ctx.timezone);
                let status = DayLoadStatus::classify(planned, capacity.hours, ctx.tolerance_hours);

                let day = DailyStats {
                    date,
                    capacity_hours: capacity.hours,
                    planned_hours: planned,
                    tolerance: ctx.tolerance_hours,
                    present_employees: capacity.present_employees,
                    status,
                };
                (date, day)
            })
            .collect();

        Ok(stats)
    }

    /// Instant window covering the business-local days `[start, end]`, used
    /// to prefilter the intervention fetch. Bucketing by start time happens
    /// afterwards in the aggregator.
    fn fetch_window(
        &self,
        ctx: &BusinessContext,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let midnight = NaiveTime::MIN;
        let window_start = local_to_instant(start, midnight, ctx.timezone)?;
        let window_end = local_to_instant(add_days(end, 1), midnight, ctx.timezone)?;
        Ok((window_start, window_end))
    }
}
