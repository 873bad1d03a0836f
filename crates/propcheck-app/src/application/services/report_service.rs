use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::info;

use propcheck_domain::session::Session;
use propcheck_domain::shared::DomainError;

/// Plain-text session reports
#[derive(Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// `trading-session-YYYY-MM-DD.txt`, dated by the session
    pub fn default_file_name(session: &Session) -> String {
        format!(
            "trading-session-{}.txt",
            session.timestamp().format("%Y-%m-%d")
        )
    }

    pub fn render(&self, session: &Session) -> String {
        let config = session.config();
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "Trading Session Report");
        let _ = writeln!(out, "======================");
        let _ = writeln!(
            out,
            "Date:              {}",
            session.timestamp().format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(out, "Account Size:      {}", format_currency(config.account_size));
        let _ = writeln!(
            out,
            "Profit Target:     {}%",
            config.profit_target_percentage
        );
        let _ = writeln!(
            out,
            "Consistency Rule:  {}%",
            config.consistency_rule_percentage
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "Daily Entries");
        let _ = writeln!(out, "-------------");
        let _ = writeln!(out, "{:<6}{}", "Day", "Profit/Loss");
        for entry in session.daily_entries() {
            let profit = entry
                .profit
                .map(format_currency)
                .unwrap_or_else(|| "(not entered)".to_string());
            let _ = writeln!(out, "{:<6}{}", entry.day, profit);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Results");
        let _ = writeln!(out, "-------");
        match session.results() {
            Some(results) => {
                let _ = writeln!(
                    out,
                    "Total Profit:            {} ({:.2}%)",
                    format_currency(results.total_profit),
                    results.return_on_account(config.account_size)
                );
                let _ = writeln!(
                    out,
                    "Biggest Profit Day:      Day {} ({})",
                    results.biggest_profit_day,
                    format_currency(results.biggest_profit_amount)
                );
                let _ = writeln!(
                    out,
                    "Biggest Day Percentage:  {:.2}%",
                    results.biggest_day_percentage
                );
                let _ = writeln!(
                    out,
                    "Profit Target:           {} ({})",
                    format_currency(results.profit_target),
                    verdict(results.passed_profit_target)
                );
                let _ = writeln!(
                    out,
                    "Consistency Rule:        {}",
                    verdict(results.passed_consistency_rule)
                );
            }
            None => {
                let _ = writeln!(out, "No results recorded for this session.");
            }
        }

        out
    }

    /// Render `session` into `output`, or into the default file name
    /// inside `dir` when no explicit path is given
    pub async fn write_report(
        &self,
        session: &Session,
        output: Option<&Path>,
        dir: &Path,
    ) -> Result<PathBuf, DomainError> {
        let path = match output {
            Some(path) => path.to_path_buf(),
            None => dir.join(Self::default_file_name(session)),
        };

        tokio::fs::write(&path, self.render(session))
            .await
            .map_err(|e| {
                DomainError::Infrastructure(format!(
                    "Failed to write report {}: {}",
                    path.display(),
                    e
                ))
            })?;

        info!(session_id = %session.id(), path = %path.display(), "Report written");
        Ok(path)
    }
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASSED"
    } else {
        "FAILED"
    }
}

/// `-1234.5` -> `-$1,234.50`
fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}
