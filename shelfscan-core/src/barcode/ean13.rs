//! EAN-13 scanline decoding
//!
//! Works on a single grayscale row: binarize, run-length the bars,
//! locate the start/middle/end guards, classify each 4-run digit group
//! against the L/G/R module tables, recover the leading digit from the
//! left-half parity pattern, and verify the check digit.

/// Module run lengths for the L (odd parity) digit set.
///
/// Left-half digits start on a space, right-half (R) digits use the same
/// run lengths starting on a bar. The G (even parity) set is the L set
/// reversed. Every group spans 7 modules in 4 runs.
const L_RUNS: [[u8; 4]; 10] = [
    [3, 2, 1, 1], // 0
    [2, 2, 2, 1], // 1
    [2, 1, 2, 2], // 2
    [1, 4, 1, 1], // 3
    [1, 1, 3, 2], // 4
    [1, 2, 3, 1], // 5
    [1, 1, 1, 4], // 6
    [1, 3, 1, 2], // 7
    [1, 2, 1, 3], // 8
    [3, 1, 1, 2], // 9
];

/// Left-half parity patterns keyed by the implied leading digit
/// (true = odd/L, false = even/G).
const PARITY: [[bool; 6]; 10] = [
    [true, true, true, true, true, true],     // 0
    [true, true, false, true, false, false],  // 1
    [true, true, false, false, true, false],  // 2
    [true, true, false, false, false, true],  // 3
    [true, false, true, true, false, false],  // 4
    [true, false, false, true, true, false],  // 5
    [true, false, false, false, true, true],  // 6
    [true, false, true, false, true, false],  // 7
    [true, false, true, false, false, true],  // 8
    [true, false, false, true, false, true],  // 9
];

/// Runs between the start and end guard, inclusive:
/// 3 (start) + 24 (left) + 5 (middle) + 24 (right) + 3 (end).
const SYMBOL_RUNS: usize = 59;

/// Minimum black/white contrast for a row to be worth scanning
const MIN_CONTRAST: u8 = 32;

/// Compute the EAN-13 check digit for the first 12 digits
pub fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .take(12)
        .enumerate()
        .map(|(i, &d)| d as u32 * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Whether a string is a well-formed EAN-13 with a valid check digit
pub fn validate(code: &str) -> bool {
    let digits: Vec<u8> = code
        .bytes()
        .filter_map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect();
    digits.len() == 13 && code.len() == 13 && check_digit(&digits) == digits[12]
}

/// Attempt to decode one grayscale scanline. Returns the 13 digits on
/// success; any structural mismatch or check-digit failure yields None.
pub fn decode_row(row: &[u8]) -> Option<String> {
    // 95 modules minimum at 1px per module
    if row.len() < 95 {
        return None;
    }

    let min = *row.iter().min()?;
    let max = *row.iter().max()?;
    if max - min < MIN_CONTRAST {
        return None;
    }
    let threshold = min + (max - min) / 2;

    // Run-length encode the row
    let mut runs: Vec<usize> = Vec::new();
    let mut blacks: Vec<bool> = Vec::new();
    let mut current = row[0] < threshold;
    let mut len = 0usize;
    for &px in row {
        let black = px < threshold;
        if black == current {
            len += 1;
        } else {
            runs.push(len);
            blacks.push(current);
            current = black;
            len = 1;
        }
    }
    runs.push(len);
    blacks.push(current);

    // Try every black run as a start-guard candidate
    for i in 0..runs.len() {
        if !blacks[i] || i + SYMBOL_RUNS > runs.len() {
            continue;
        }
        if let Some(code) = decode_at(&runs, i) {
            return Some(code);
        }
    }
    None
}

/// Decode a symbol whose start guard begins at run index `start`
fn decode_at(runs: &[usize], start: usize) -> Option<String> {
    let unit = (runs[start] + runs[start + 1] + runs[start + 2]) as f32 / 3.0;

    // Quiet zone before the start guard
    if start == 0 || (runs[start - 1] as f32) < 3.0 * unit {
        return None;
    }

    // Guards are all single-module runs
    let start_guard = &runs[start..start + 3];
    let middle_guard = &runs[start + 27..start + 32];
    let end_guard = &runs[start + 56..start + 59];
    for &run in start_guard.iter().chain(middle_guard).chain(end_guard) {
        let ratio = run as f32 / unit;
        if !(0.5..=1.7).contains(&ratio) {
            return None;
        }
    }

    let mut digits = [0u8; 13];
    let mut parity = [false; 6];

    // Left half: 6 digits in L or G encoding
    for k in 0..6 {
        let group = &runs[start + 3 + 4 * k..start + 7 + 4 * k];
        let (digit, odd) = classify_left(group)?;
        digits[k + 1] = digit;
        parity[k] = odd;
    }

    // Leading digit is implied by the parity pattern
    digits[0] = PARITY.iter().position(|p| *p == parity)? as u8;

    // Right half: 6 digits, always R encoding
    for k in 0..6 {
        let group = &runs[start + 32 + 4 * k..start + 36 + 4 * k];
        digits[k + 7] = classify_right(group)?;
    }

    if check_digit(&digits) != digits[12] {
        return None;
    }

    Some(digits.iter().map(|d| (d + b'0') as char).collect())
}

/// Normalize a 4-run group to module widths summing to 7
fn modules(group: &[usize]) -> [f32; 4] {
    let total: usize = group.iter().sum();
    let mut out = [0.0; 4];
    for (m, &run) in out.iter_mut().zip(group) {
        *m = run as f32 * 7.0 / total as f32;
    }
    out
}

fn distance(widths: &[f32; 4], table: &[u8; 4]) -> f32 {
    widths
        .iter()
        .zip(table)
        .map(|(w, &t)| (w - t as f32).abs())
        .sum()
}

/// Classify a left-half group, trying both the L and the reversed-L (G)
/// tables. Returns the digit and whether the parity was odd.
fn classify_left(group: &[usize]) -> Option<(u8, bool)> {
    let widths = modules(group);
    let mut best: Option<(f32, u8, bool)> = None;
    for (digit, l) in L_RUNS.iter().enumerate() {
        let g: [u8; 4] = [l[3], l[2], l[1], l[0]];
        for (table, odd) in [(l, true), (&g, false)] {
            let dist = distance(&widths, table);
            if best.map_or(true, |(b, _, _)| dist < b) {
                best = Some((dist, digit as u8, odd));
            }
        }
    }
    match best {
        Some((dist, digit, odd)) if dist < 1.5 => Some((digit, odd)),
        _ => None,
    }
}

/// Classify a right-half group against the R table (L run lengths)
fn classify_right(group: &[usize]) -> Option<u8> {
    let widths = modules(group);
    let mut best: Option<(f32, u8)> = None;
    for (digit, table) in L_RUNS.iter().enumerate() {
        let dist = distance(&widths, table);
        if best.map_or(true, |(b, _)| dist < b) {
            best = Some((dist, digit as u8));
        }
    }
    match best {
        Some((dist, digit)) if dist < 1.5 => Some(digit),
        _ => None,
    }
}

/// Render an ideal scanline for a 13-digit code, `unit` pixels per
/// module, with quiet zones on both sides. Black is 0, white is 255.
///
/// Used to build test fixtures; panics on non-EAN-13 input.
pub fn synthesize_row(code: &str, unit: usize) -> Vec<u8> {
    assert!(validate(code), "synthesize_row needs a valid EAN-13: {:?}", code);
    let digits: Vec<u8> = code.bytes().map(|b| b - b'0').collect();

    // true = black module
    let mut bits: Vec<bool> = Vec::with_capacity(95 + 22);
    let push_runs = |bits: &mut Vec<bool>, table: &[u8; 4], mut black: bool| {
        for &run in table {
            for _ in 0..run {
                bits.push(black);
            }
            black = !black;
        }
    };

    bits.extend(std::iter::repeat(false).take(11)); // quiet zone
    bits.extend([true, false, true]); // start guard
    for k in 0..6 {
        let l = &L_RUNS[digits[k + 1] as usize];
        if PARITY[digits[0] as usize][k] {
            push_runs(&mut bits, l, false);
        } else {
            let g: [u8; 4] = [l[3], l[2], l[1], l[0]];
            push_runs(&mut bits, &g, false);
        }
    }
    bits.extend([false, true, false, true, false]); // middle guard
    for k in 0..6 {
        push_runs(&mut bits, &L_RUNS[digits[k + 7] as usize], true);
    }
    bits.extend([true, false, true]); // end guard
    bits.extend(std::iter::repeat(false).take(11)); // quiet zone

    bits.iter()
        .flat_map(|&black| std::iter::repeat(if black { 0u8 } else { 255u8 }).take(unit))
        .collect()
}
