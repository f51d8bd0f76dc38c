//! Payload budgeting for resolved page props.
//!
//! Pages whose serialized props exceed the configured ceiling are reduced
//! tier by tier (see [`Tier::LADDER`]) until they fit:
//!
//! ```text
//! measure ──► fits? ──yes──► done
//!               │no
//!               ▼
//!   cap collections ─► measure ─► fits? ─► truncate text ─► measure ─► ...
//! ```
//!
//! The input props are never modified; reductions happen on a copy.

mod ladder;

pub use ladder::{TRUNCATION_NOTICE, Tier};

use crate::{
    config::BudgetConfig,
    content::normalize_url_path,
    log,
    props::{PageProps, PropsError},
    utils::size::format_size,
};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Outcome of budgeting one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetReport {
    pub url_path: String,
    pub original_bytes: usize,
    pub final_bytes: usize,
    pub ceiling: usize,
    /// Tiers applied, in order
    pub tiers: SmallVec<[Tier; 3]>,
    pub within_ceiling: bool,
}

impl BudgetReport {
    pub fn reduced(&self) -> bool {
        !self.tiers.is_empty()
    }
}

/// Props that went through the budgeter, with its report.
#[derive(Debug, Clone)]
pub struct Budgeted {
    pub props: PageProps,
    pub report: BudgetReport,
}

/// Fits page props under a byte ceiling.
#[derive(Debug, Clone, Copy)]
pub struct Budgeter<'a> {
    config: &'a BudgetConfig,
    ceiling: usize,
    warn_threshold: usize,
}

impl<'a> Budgeter<'a> {
    pub fn new(config: &'a BudgetConfig) -> Self {
        Self {
            config,
            ceiling: config.ceiling_bytes(),
            warn_threshold: config.warn_bytes(),
        }
    }

    /// Reduce `props` until its compact JSON fits the ceiling or every tier
    /// has been applied.
    ///
    /// `url_path` is normalized before picking caps, so `/info/` and `/info`
    /// budget the same way.
    pub fn fit(&self, url_path: &str, props: &PageProps) -> Result<Budgeted, PropsError> {
        let url_path = normalize_url_path(url_path).unwrap_or(Cow::Borrowed(url_path));
        let url_path = url_path.as_ref();
        let original_bytes = measure(props)?;
        let mut report = BudgetReport {
            url_path: url_path.to_owned(),
            original_bytes,
            final_bytes: original_bytes,
            ceiling: self.ceiling,
            tiers: SmallVec::new(),
            within_ceiling: original_bytes <= self.ceiling,
        };
        let mut props = props.clone();

        if !report.within_ceiling {
            log!(
                "budget";
                "{}: {} exceeds ceiling {}",
                url_path,
                format_size(original_bytes),
                format_size(self.ceiling)
            );

            let caps = self.config.caps_for(url_path);
            for tier in Tier::LADDER {
                tier.apply(&mut props, &caps, self.config.text_limit);
                report.tiers.push(tier);
                report.final_bytes = measure(&props)?;
                if report.final_bytes <= self.ceiling {
                    break;
                }
            }
            report.within_ceiling = report.final_bytes <= self.ceiling;

            let tiers: Vec<_> = report.tiers.iter().map(|t| t.name()).collect();
            log!(
                "budget";
                "{}: {} -> {} after {}",
                url_path,
                format_size(report.original_bytes),
                format_size(report.final_bytes),
                tiers.join(", ")
            );
            if !report.within_ceiling {
                log!("warn"; "{}: still over ceiling after every reduction tier", url_path);
            }
        }

        if report.final_bytes > self.warn_threshold {
            log!("warn"; "{}: large payload {}", url_path, format_size(report.final_bytes));
        }

        Ok(Budgeted { props, report })
    }
}

/// Size of the compact JSON serialization.
fn measure(props: &PageProps) -> Result<usize, PropsError> {
    Ok(serde_json::to_vec(props)?.len())
}
