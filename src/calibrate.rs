//! Workload calibration: turning a warm-up estimate into a main-phase plan.
//!
//! Low-bandwidth links cannot sustain a large concurrent burst without the
//! result being skewed by connection contention, so payload size and
//! concurrency scale up only when the warm-up evidence supports it. Below a
//! floor the main phase is skipped and the warm-up estimate stands.

/// How many concurrent requests of which size tier make up a main phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadPlan {
    /// Number of concurrent requests in the burst.
    pub requests: usize,
    /// Index into the size tier table ([`crate::params::DL_SIZES`] or
    /// [`crate::params::UL_SIZES`]).
    pub tier: usize,
}

/// Pick the download main-phase workload for an observed warm-up speed.
///
/// `None` means the link is too slow for a calibrated burst and the warm-up
/// estimate should be reported as the final speed.
pub fn download_plan(warmup_mbps: f64) -> Option<WorkloadPlan> {
    match warmup_mbps {
        s if s > 50.0 => Some(WorkloadPlan { requests: 32, tier: 6 }),
        s if s > 10.0 => Some(WorkloadPlan { requests: 16, tier: 4 }),
        s if s > 4.0 => Some(WorkloadPlan { requests: 8, tier: 4 }),
        s if s > 2.5 => Some(WorkloadPlan { requests: 4, tier: 4 }),
        _ => None,
    }
}

/// Pick the upload main-phase workload for an observed warm-up speed.
pub fn upload_plan(warmup_mbps: f64) -> Option<WorkloadPlan> {
    match warmup_mbps {
        s if s > 50.0 => Some(WorkloadPlan { requests: 40, tier: 9 }),
        s if s > 10.0 => Some(WorkloadPlan { requests: 16, tier: 9 }),
        s if s > 4.0 => Some(WorkloadPlan { requests: 8, tier: 9 }),
        s if s > 2.5 => Some(WorkloadPlan { requests: 4, tier: 5 }),
        _ => None,
    }
}

/// The single-request, minimal-tier plan used when a caller asks for a
/// cheap one-shot upload sample regardless of warm-up speed.
pub fn reduced_upload_plan() -> WorkloadPlan {
    WorkloadPlan { requests: 1, tier: 0 }
}
