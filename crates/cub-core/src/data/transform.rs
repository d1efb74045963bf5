//! Elementwise and whole-column transforms
//!
//! Transforms keep the row count and the column set. Object columns are
//! never transformed, only copied.

use super::*;

use ndarray::{s, Array1, Axis};

/// The transforms `DataFrame::non_agg` knows how to apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Abs,
    CumMin,
    CumMax,
    CumSum,
    /// Bound values from below and/or above; a missing bound is open
    Clip {
        lower: Option<f64>,
        upper: Option<f64>,
    },
    /// Round to a number of decimals, half to even; negative rounds to tens
    Round(i32),
    Copy,
    /// Difference from the value `n` rows earlier
    Diff(isize),
    /// Relative change from the value `n` rows earlier
    PctChange(isize),
}

fn accumulate<T, F>(arr: &Array1<T>, f: F) -> Array1<T>
where
    T: Copy,
    F: Fn(T, T) -> T,
{
    let mut out = arr.clone();
    out.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr = f(prev, *curr));
    out
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

fn clip_f64(v: f64, lower: Option<f64>, upper: Option<f64>) -> f64 {
    let v = lower.map_or(v, |lo| if v < lo { lo } else { v });
    upper.map_or(v, |hi| if v > hi { hi } else { v })
}

fn clip_int(arr: &IntArray, lower: Option<f64>, upper: Option<f64>) -> Column {
    let integral = lower.iter().chain(upper.iter()).all(|b| b.fract() == 0.0);

    if integral {
        let lo = lower.map(|b| b as i64);
        let hi = upper.map(|b| b as i64);
        Column::Int(arr.mapv(|v| {
            let v = lo.map_or(v, |lo| v.max(lo));
            hi.map_or(v, |hi| v.min(hi))
        }))
    } else {
        Column::Float(arr.mapv(|v| clip_f64(v as f64, lower, upper)))
    }
}

/// Round an integer to a multiple of `m`, ties to the even multiple
fn round_int(v: i64, m: i64) -> i64 {
    let q = v.div_euclid(m);
    let twice_rem = 2 * v.rem_euclid(m);
    let q = if twice_rem > m || (twice_rem == m && q % 2 != 0) {
        q + 1
    } else {
        q
    };
    q.wrapping_mul(m)
}

fn round_f64(v: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (v * factor).round_ties_even() / factor
}

/// Difference (or relative change) against the value `n` positions back
///
/// The shift wraps around, then the `n` positions without a real
/// predecessor are set to NaN.
fn shifted_change(values: FloatArray, n: isize, relative: bool) -> FloatArray {
    let len = values.len();
    if len == 0 {
        return values;
    }

    let shift = n.rem_euclid(len as isize) as usize;
    let mut out = FloatArray::from_shape_fn(len, |i| {
        let prev = values[(i + len - shift) % len];
        let change = values[i] - prev;
        if relative {
            change / prev
        } else {
            change
        }
    });

    let boundary = n.unsigned_abs().min(len);
    if n >= 0 {
        out.slice_mut(s![..boundary]).fill(f64::NAN);
    } else {
        out.slice_mut(s![len - boundary..]).fill(f64::NAN);
    }

    out
}

impl Column {
    /// Apply a transform; Object columns come back as unmodified copies
    pub fn transform(&self, transform: Transform) -> Result<Column> {
        if let Column::Object(_) = self {
            return Ok(self.clone());
        }

        let out = match (transform, self) {
            (Transform::Copy, column) => column.clone(),

            (Transform::Abs, Column::Int(arr)) => Column::Int(arr.mapv(i64::wrapping_abs)),
            (Transform::Abs, Column::Float(arr)) => Column::Float(arr.mapv(f64::abs)),
            (Transform::Abs, column) => column.clone(),

            (Transform::CumMin, Column::Int(arr)) => Column::Int(accumulate(arr, i64::min)),
            (Transform::CumMin, Column::Float(arr)) => Column::Float(accumulate(arr, nan_min)),
            (Transform::CumMin, Column::Bool(arr)) => Column::Bool(accumulate(arr, |a, b| a && b)),
            (Transform::CumMax, Column::Int(arr)) => Column::Int(accumulate(arr, i64::max)),
            (Transform::CumMax, Column::Float(arr)) => Column::Float(accumulate(arr, nan_max)),
            (Transform::CumMax, Column::Bool(arr)) => Column::Bool(accumulate(arr, |a, b| a || b)),
            (Transform::CumSum, Column::Int(arr)) => {
                Column::Int(accumulate(arr, i64::wrapping_add))
            }
            (Transform::CumSum, Column::Float(arr)) => Column::Float(accumulate(arr, |a, b| a + b)),
            (Transform::CumSum, Column::Bool(arr)) => {
                Column::Int(accumulate(&arr.mapv(i64::from), i64::wrapping_add))
            }

            (Transform::Clip { lower: None, upper: None }, column) => column.clone(),
            (Transform::Clip { lower, upper }, Column::Int(arr)) => clip_int(arr, lower, upper),
            (Transform::Clip { lower, upper }, Column::Bool(arr)) => {
                clip_int(&arr.mapv(i64::from), lower, upper)
            }
            (Transform::Clip { lower, upper }, Column::Float(arr)) => {
                Column::Float(arr.mapv(|v| clip_f64(v, lower, upper)))
            }

            (Transform::Round(decimals), Column::Float(arr)) => {
                Column::Float(arr.mapv(|v| round_f64(v, decimals)))
            }
            (Transform::Round(decimals), Column::Int(arr)) if decimals < 0 => {
                match 10i64.checked_pow(decimals.unsigned_abs()) {
                    Some(m) => Column::Int(arr.mapv(|v| round_int(v, m))),
                    None => Column::Int(IntArray::zeros(arr.len())),
                }
            }
            (Transform::Round(_), column) => column.clone(),

            (Transform::Diff(n), column) => Column::Float(shifted_change(column.to_float()?, n, false)),
            (Transform::PctChange(n), column) => {
                Column::Float(shifted_change(column.to_float()?, n, true))
            }

            (_, Column::Object(_)) => self.clone(),
        };

        Ok(out)
    }
}

impl DataFrame {
    /// Apply a transform to every column, keeping names and row count
    pub fn non_agg(&self, transform: Transform) -> Result<DataFrame> {
        self.map_columns(|column| column.transform(transform))
    }

    pub fn abs(&self) -> Result<DataFrame> {
        self.non_agg(Transform::Abs)
    }

    pub fn cummin(&self) -> Result<DataFrame> {
        self.non_agg(Transform::CumMin)
    }

    pub fn cummax(&self) -> Result<DataFrame> {
        self.non_agg(Transform::CumMax)
    }

    pub fn cumsum(&self) -> Result<DataFrame> {
        self.non_agg(Transform::CumSum)
    }

    /// Set values below `lower` to `lower` and above `upper` to `upper`
    pub fn clip(&self, lower: Option<f64>, upper: Option<f64>) -> Result<DataFrame> {
        self.non_agg(Transform::Clip { lower, upper })
    }

    pub fn round(&self, decimals: i32) -> Result<DataFrame> {
        self.non_agg(Transform::Round(decimals))
    }

    /// A deep copy of every column
    pub fn copy(&self) -> Result<DataFrame> {
        self.non_agg(Transform::Copy)
    }

    /// Difference between each value and the value `n` rows above it
    pub fn diff(&self, n: isize) -> Result<DataFrame> {
        self.non_agg(Transform::Diff(n))
    }

    /// Relative change between each value and the value `n` rows above it
    pub fn pct_change(&self, n: isize) -> Result<DataFrame> {
        self.non_agg(Transform::PctChange(n))
    }
}
