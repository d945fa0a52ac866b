use crate::date::parse_iso_date;
use crate::process::{JudicialProcess, Payment};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Payments of one calendar month, with gross/tax/net subtotals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    pub month: u32,
    pub month_name: &'static str,
    pub payments: Vec<Payment>,
    pub gross_total: f64,
    pub taxes_total: f64,
    pub net_total: f64,
}

/// Printable annual summary of payments received across processes. Months
/// with no payments are omitted; an empty `months` list is the valid
/// representation of a year without income.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualReport {
    pub year: i32,
    pub months: Vec<MonthReport>,
    pub grand_total: f64,
}

/// Pure fold over already-fetched payment records: filter to the calendar
/// year, group by month in calendar order, sort each month's payments by
/// date ascending, and sum gross, withheld taxes and net per month plus the
/// annual net grand total. Payments whose date does not parse are skipped.
#[must_use]
pub fn annual_report(year: i32, processes: &[JudicialProcess]) -> AnnualReport {
    let mut by_month: BTreeMap<u32, Vec<Payment>> = BTreeMap::new();
    for process in processes {
        for payment in &process.fees_received {
            let Some(date) = parse_iso_date(&payment.date) else {
                continue;
            };
            if date.year() != year {
                continue;
            }
            by_month.entry(date.month()).or_default().push(payment.clone());
        }
    }

    let mut months = Vec::with_capacity(by_month.len());
    let mut grand_total = 0.0;
    for (month, mut payments) in by_month {
        // ISO dates sort chronologically as strings.
        payments.sort_by(|a, b| a.date.cmp(&b.date));
        let gross_total: f64 = payments.iter().map(|p| p.amount).sum();
        let taxes_total: f64 = payments.iter().map(|p| p.taxes).sum();
        let net_total: f64 = payments.iter().map(|p| p.total).sum();
        grand_total += net_total;
        months.push(MonthReport {
            month,
            month_name: MONTH_NAMES[(month - 1) as usize],
            payments,
            gross_total,
            taxes_total,
            net_total,
        });
    }

    AnnualReport {
        year,
        months,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn process_with_payments(payments: Vec<Payment>) -> JudicialProcess {
        JudicialProcess {
            id: "1".into(),
            fees_received: payments,
            ..JudicialProcess::default()
        }
    }

    fn payment(date: &str, amount: f64, taxes: f64) -> Payment {
        Payment {
            id: format!("p-{date}"),
            date: date.into(),
            amount,
            taxes,
            total: amount - taxes,
            source: String::from("Parcela"),
        }
    }

    #[test]
    fn groups_by_month_in_calendar_order_with_net_totals() {
        let processes = vec![process_with_payments(vec![
            payment("2024-03-10", 1000.0, 100.0),
            payment("2024-01-05", 500.0, 0.0),
        ])];
        let report = annual_report(2024, &processes);

        let names: Vec<&str> = report.months.iter().map(|m| m.month_name).collect();
        assert_eq!(names, vec!["Janeiro", "Março"]);
        assert_eq!(report.months[0].net_total, 500.0);
        assert_eq!(report.months[1].net_total, 900.0);
        assert_eq!(report.months[1].gross_total, 1000.0);
        assert_eq!(report.months[1].taxes_total, 100.0);
        assert_eq!(report.grand_total, 1400.0);
    }

    #[test]
    fn payments_outside_the_year_are_excluded() {
        let processes = vec![process_with_payments(vec![
            payment("2023-12-31", 800.0, 0.0),
            payment("2024-01-01", 200.0, 0.0),
            payment("2025-01-01", 300.0, 0.0),
        ])];
        let report = annual_report(2024, &processes);
        assert_eq!(report.months.len(), 1);
        assert_eq!(report.grand_total, 200.0);
    }

    #[test]
    fn payments_within_a_month_sort_by_date_ascending() {
        let processes = vec![process_with_payments(vec![
            payment("2024-05-20", 100.0, 0.0),
            payment("2024-05-03", 50.0, 0.0),
            payment("2024-05-11", 75.0, 0.0),
        ])];
        let report = annual_report(2024, &processes);
        let dates: Vec<&str> = report.months[0]
            .payments
            .iter()
            .map(|p| p.date.as_str())
            .collect();
        assert_eq!(dates, vec!["2024-05-03", "2024-05-11", "2024-05-20"]);
    }

    #[test]
    fn payments_are_gathered_across_processes() {
        let processes = vec![
            process_with_payments(vec![payment("2024-02-01", 100.0, 0.0)]),
            process_with_payments(vec![payment("2024-02-15", 200.0, 0.0)]),
        ];
        let report = annual_report(2024, &processes);
        assert_eq!(report.months.len(), 1);
        assert_eq!(report.months[0].payments.len(), 2);
        assert_eq!(report.grand_total, 300.0);
    }

    #[test]
    fn empty_year_is_a_valid_empty_report() {
        let report = annual_report(2024, &[]);
        assert!(report.months.is_empty());
        assert_eq!(report.grand_total, 0.0);

        let undated = vec![process_with_payments(vec![payment("", 100.0, 0.0)])];
        assert!(annual_report(2024, &undated).months.is_empty());
    }
}
