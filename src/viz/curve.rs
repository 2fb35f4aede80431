//! Monotone cubic interpolation for the evolution chart's "monotone" line.
//!
//! Tangents follow Steffen's method: the curve passes through every sample and never
//! overshoots between two neighbours, so a rising series is drawn rising everywhere.

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Tangent at each sample.
fn tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let mut h = Vec::with_capacity(n - 1);
    let mut s = Vec::with_capacity(n - 1);
    for w in points.windows(2) {
        let dx = w[1].0 - w[0].0;
        h.push(dx);
        s.push(if dx != 0.0 { (w[1].1 - w[0].1) / dx } else { 0.0 });
    }

    let mut m = vec![0.0; n];
    for i in 1..n - 1 {
        let p = (s[i - 1] * h[i] + s[i] * h[i - 1]) / (h[i - 1] + h[i]);
        m[i] = (sign(s[i - 1]) + sign(s[i]))
            * s[i - 1].abs().min(s[i].abs()).min(0.5 * p.abs());
    }
    if n == 2 {
        m[0] = s[0];
        m[1] = s[0];
    } else {
        m[0] = (3.0 * s[0] - m[1]) / 2.0;
        m[n - 1] = (3.0 * s[n - 2] - m[n - 2]) / 2.0;
    }
    m
}

/// Sample the interpolated curve. Each segment contributes `samples_per_segment` points and
/// the last sample closes the path, so the output starts and ends on real data points.
pub fn monotone_x(points: &[(f64, f64)], samples_per_segment: usize) -> Vec<(f64, f64)> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let steps = samples_per_segment.max(1);
    let m = tangents(points);
    let mut out = Vec::with_capacity((points.len() - 1) * steps + 1);

    for i in 0..points.len() - 1 {
        let (x0, y0) = points[i];
        let (x1, y1) = points[i + 1];
        let h = x1 - x0;
        for k in 0..steps {
            let t = k as f64 / steps as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;
            let y = h00 * y0 + h10 * h * m[i] + h01 * y1 + h11 * h * m[i + 1];
            out.push((x0 + t * h, y));
        }
    }
    if let Some(last) = points.last() {
        out.push(*last);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<(f64, f64)> {
        // Growth rate column: rises, peaks, falls.
        [1.8, 1.9, 2.1, 1.8, 1.7, 1.3, 1.2, 1.0, 0.9, 0.8, 0.7, 0.5]
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    #[test]
    fn passes_through_samples() {
        let pts = series();
        let out = monotone_x(&pts, 8);
        assert_eq!(out.len(), (pts.len() - 1) * 8 + 1);
        for (i, p) in pts.iter().enumerate() {
            let (x, y) = out[i * 8];
            assert!((x - p.0).abs() < 1e-12);
            assert!((y - p.1).abs() < 1e-12);
        }
    }

    #[test]
    fn never_overshoots_neighbours() {
        let pts = series();
        let out = monotone_x(&pts, 16);
        for seg in 0..pts.len() - 1 {
            let lo = pts[seg].1.min(pts[seg + 1].1) - 1e-9;
            let hi = pts[seg].1.max(pts[seg + 1].1) + 1e-9;
            for (_, y) in &out[seg * 16..=seg * 16 + 16] {
                assert!(*y >= lo && *y <= hi, "segment {seg}: {y} outside [{lo}, {hi}]");
            }
        }
    }

    #[test]
    fn rising_series_stays_rising() {
        let pts: Vec<(f64, f64)> = [2.5, 3.0, 3.7, 4.4, 5.3, 6.1, 6.9, 7.8, 8.0, 8.5, 9.2, 9.7]
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        let out = monotone_x(&pts, 10);
        assert!(out.windows(2).all(|w| w[1].1 >= w[0].1 - 1e-12));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(monotone_x(&[], 4).is_empty());
        assert_eq!(monotone_x(&[(0.0, 1.0)], 4), vec![(0.0, 1.0)]);
        let line = monotone_x(&[(0.0, 0.0), (1.0, 2.0)], 2);
        assert_eq!(line, vec![(0.0, 0.0), (0.5, 1.0), (1.0, 2.0)]);
    }
}
