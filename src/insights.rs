//! Insight generation
//!
//! Deterministic threshold rules over scores and temporal statistics.
//! Rules are independent and additive: any subset may fire and none
//! suppresses another. Every threshold comes from [`ProfilerConfig`], with
//! defaults that reproduce the historical constants exactly.

use crate::config::{HourWindow, ProfilerConfig};
use crate::types::{BrowserInsights, FileInsights, FilePatterns, HourHistogram, ScoreDistribution};

pub struct InsightGenerator<'a> {
    config: &'a ProfilerConfig,
}

impl<'a> InsightGenerator<'a> {
    pub fn new(config: &'a ProfilerConfig) -> Self {
        Self { config }
    }

    /// Trait and work-style labels from browsing scores and hourly activity
    pub fn browser(
        &self,
        scores: &ScoreDistribution,
        hourly: &HourHistogram,
        total_records: usize,
    ) -> BrowserInsights {
        let mut traits = Vec::new();

        if score_of(scores, "technology") > self.config.trait_floor {
            traits.push("Technically Inclined".to_string());
        }
        // Label wording, oddity included, is kept byte-for-byte for
        // consumers that key on the historical strings
        if score_of(scores, "academic") > self.config.academic_floor {
            traits.push("Intellectual Curious".to_string());
        }
        if score_of(scores, "entertainment") > self.config.trait_floor {
            traits.push("Entertainment-Focused".to_string());
        }

        let mut work_style = Vec::new();
        let window_rules: [(&HourWindow, &str); 3] = [
            (&self.config.early_bird, "Morning Productive"),
            (&self.config.night_owl, "Night Productive"),
            (&self.config.work_hours, "Business Hours Browser"),
        ];

        for (window, label) in window_rules {
            if self.window_fires(hourly, window, total_records) {
                work_style.push(label.to_string());
            }
        }

        BrowserInsights { traits, work_style }
    }

    /// Activity, work-habit and storage labels from file scores and patterns
    pub fn files(&self, scores: &ScoreDistribution, patterns: &FilePatterns) -> FileInsights {
        let primary_activities = scores
            .iter()
            .filter(|(_, score)| **score > self.config.active_user_floor)
            .map(|(category, _)| format!("Active {category} user"))
            .collect();

        let mut work_habits = Vec::new();
        if let Some((peak_hour, peak_count)) = peak_entry(&patterns.modification_hours) {
            // Gate: peak count against 30% of the distinct observed hours
            let gate = patterns.modification_hours.len() as f64 * self.config.window_share;
            if peak_count as f64 > gate {
                if self.config.morning_peak.contains(peak_hour) {
                    work_habits.push("Morning person".to_string());
                } else if self.config.night_peak_late.contains(peak_hour)
                    || self.config.night_peak_early.contains(peak_hour)
                {
                    work_habits.push("Night owl".to_string());
                }
            }
        }

        let mut storage_habits = Vec::new();
        if patterns.size_metrics.average_size > self.config.large_file_floor_bytes as f64 {
            storage_habits.push("Handles large files frequently".to_string());
        }

        FileInsights {
            primary_activities,
            work_habits,
            storage_habits,
        }
    }

    /// More than `window_share` of all records fall inside the window.
    /// Membership uses the non-wrapping arithmetic of [`HourWindow`].
    fn window_fires(&self, hourly: &HourHistogram, window: &HourWindow, total: usize) -> bool {
        let in_window: u64 = hourly
            .iter()
            .filter(|(hour, _)| window.contains(**hour))
            .map(|(_, count)| *count)
            .sum();

        in_window as f64 > total as f64 * self.config.window_share
    }
}

fn score_of(scores: &ScoreDistribution, category: &str) -> f64 {
    scores.get(category).copied().unwrap_or(0.0)
}

/// Hour with the highest count; lowest hour wins ties
fn peak_entry(hourly: &HourHistogram) -> Option<(u32, u64)> {
    let mut best: Option<(u32, u64)> = None;
    for (&hour, &count) in hourly {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((hour, count)),
        }
    }
    best
}
