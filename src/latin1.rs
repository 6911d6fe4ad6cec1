//! Packed character properties for U+0000..=U+00FF.
//!
//! Two units per code point, high unit first. The low five bits of a combined record
//! hold the general category; the upper bits carry case and numeric metadata.

/// Number of code points covered by [`LATIN1_PACKED`].
pub const LATIN1_SIZE: usize = 256;

/// Packed record table for the Latin-1 fast path.
#[rustfmt::skip]
pub const LATIN1_PACKED: [u16; LATIN1_SIZE * 2] = [
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x5800, 0x400F, 0x5000, 0x400F, 0x5800, 0x400F,
    0x6000, 0x400F, 0x5000, 0x400F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x5000, 0x400F, 0x5000, 0x400F, 0x5000, 0x400F, 0x5800, 0x400F,
    0x6000, 0x400C, 0x6800, 0x0018, 0x6800, 0x0018, 0x2800, 0x0018,
    0x2800, 0x601A, 0x2800, 0x0018, 0x6800, 0x0018, 0x6800, 0x0018,
    0xE800, 0x0015, 0xE800, 0x0016, 0x6800, 0x0018, 0x2800, 0x0019,
    0x3800, 0x0018, 0x2800, 0x0014, 0x3800, 0x0018, 0x2000, 0x0018,
    0x1800, 0x3609, 0x1800, 0x3609, 0x1800, 0x3609, 0x1800, 0x3609,
    0x1800, 0x3609, 0x1800, 0x3609, 0x1800, 0x3609, 0x1800, 0x3609,
    0x1800, 0x3609, 0x1800, 0x3609, 0x3800, 0x0018, 0x6800, 0x0018,
    0xE800, 0x0019, 0x6800, 0x0019, 0xE800, 0x0019, 0x6800, 0x0018,
    0x6800, 0x0018, 0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1,
    0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1,
    0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1,
    0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1,
    0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1,
    0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1,
    0x0082, 0x7FE1, 0x0082, 0x7FE1, 0x0082, 0x7FE1, 0xE800, 0x0015,
    0x6800, 0x0018, 0xE800, 0x0016, 0x6800, 0x001B, 0x6800, 0x5017,
    0x6800, 0x001B, 0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2,
    0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2,
    0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2,
    0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2,
    0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2,
    0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2,
    0x0081, 0x7FE2, 0x0081, 0x7FE2, 0x0081, 0x7FE2, 0xE800, 0x0015,
    0x6800, 0x0019, 0xE800, 0x0016, 0x6800, 0x0019, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x5000, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F, 0x4800, 0x100F,
    0x3800, 0x000C, 0x6800, 0x0018, 0x2800, 0x601A, 0x2800, 0x601A,
    0x2800, 0x601A, 0x2800, 0x601A, 0x6800, 0x001C, 0x6800, 0x001C,
    0x6800, 0x001B, 0x6800, 0x001C, 0x0000, 0x7002, 0xE800, 0x001D,
    0x6800, 0x0019, 0x6800, 0x1010, 0x6800, 0x001C, 0x6800, 0x001B,
    0x2800, 0x001C, 0x2800, 0x0019, 0x1800, 0x060B, 0x1800, 0x060B,
    0x6800, 0x001B, 0x07FD, 0x7002, 0x6800, 0x001C, 0x6800, 0x0018,
    0x6800, 0x001B, 0x1800, 0x050B, 0x0000, 0x7002, 0xE800, 0x001E,
    0x6800, 0x080B, 0x6800, 0x080B, 0x6800, 0x080B, 0x6800, 0x0018,
    0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001,
    0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001,
    0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001,
    0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001,
    0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001,
    0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001, 0x6800, 0x0019,
    0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001,
    0x0082, 0x7001, 0x0082, 0x7001, 0x0082, 0x7001, 0x07FD, 0x7002,
    0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002,
    0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002,
    0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002,
    0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002,
    0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002,
    0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002, 0x6800, 0x0019,
    0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002,
    0x0081, 0x7002, 0x0081, 0x7002, 0x0081, 0x7002, 0x061D, 0x7002,
];
