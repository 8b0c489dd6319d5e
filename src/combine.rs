//! Profile combination
//!
//! Merges the two sources' score distributions with a fixed weighting
//! (0.6 browser / 0.4 file by default) over the union of category names,
//! treating a category missing from one source as 0. Temporal data is
//! reported side by side, since browser peak hours and file-modification
//! hours live in different domains and are never summed; primary-category
//! lists stay separate per source.

use crate::config::ProfilerConfig;
use crate::types::{
    ActivityTimes, BrowserProfile, CombinedProfile, FileProfile, PrimaryCategories,
    ScoreDistribution,
};
use std::collections::BTreeSet;

pub struct ProfileCombiner<'a> {
    config: &'a ProfilerConfig,
}

impl<'a> ProfileCombiner<'a> {
    pub fn new(config: &'a ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn combine(&self, browser: &BrowserProfile, files: &FileProfile) -> CombinedProfile {
        CombinedProfile {
            interests: self.merge_scores(&browser.interests, &files.interests),
            activity_times: ActivityTimes {
                browser: browser.patterns.peak_hours.clone(),
                files: files.patterns.modification_hours.clone(),
            },
            primary_categories: PrimaryCategories {
                browser: self.primary(&browser.interests),
                files: self.primary(&files.interests),
            },
        }
    }

    /// Weighted merge over the union of category names. Categories absent
    /// from both inputs never appear in the output.
    fn merge_scores(
        &self,
        browser: &ScoreDistribution,
        files: &ScoreDistribution,
    ) -> ScoreDistribution {
        let names: BTreeSet<&String> = browser.keys().chain(files.keys()).collect();

        names
            .into_iter()
            .map(|name| {
                let browser_score = browser.get(name).copied().unwrap_or(0.0);
                let file_score = files.get(name).copied().unwrap_or(0.0);
                let merged = self.config.browser_weight * browser_score
                    + self.config.file_weight * file_score;
                (name.clone(), merged)
            })
            .collect()
    }

    /// Categories scoring above the active-user floor, name order
    fn primary(&self, scores: &ScoreDistribution) -> Vec<String> {
        scores
            .iter()
            .filter(|(_, score)| **score > self.config.active_user_floor)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
