//! Size tier tables and fixed measurement parameters.

/// Pixel dimensions of the download test tiles, indexed by size tier.
/// Tier `w` downloads `random<w>x<w>.jpg` from the server base URL.
pub const DL_SIZES: [u32; 10] = [350, 500, 750, 1000, 1500, 2000, 2500, 3000, 3500, 4000];

/// Upload payload sizes in kilobytes, indexed by size tier.
pub const UL_SIZES: [u32; 10] = [100, 300, 500, 800, 1000, 1500, 2500, 3000, 3500, 4000];

/// Sequential probes per latency measurement; the minimum round trip wins.
pub const LATENCY_PROBE_ATTEMPTS: usize = 3;

/// Concurrent requests in every warm-up phase.
pub const WARMUP_REQUESTS: usize = 2;

/// Size tier used by the download warm-up (a 750x750 tile).
pub const DOWNLOAD_WARMUP_TIER: usize = 2;

/// Size tier used by the upload warm-up (a 1000 kB body).
pub const UPLOAD_WARMUP_TIER: usize = 4;
