use crate::error::Error;

/// Resolved start/stop/step triple over a sequence of known length,
/// following the slicing rules of sequence protocols: negative indices
/// count from the end, out-of-range indices clamp, and a negative step
/// walks backwards from `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SliceSpec {
    pub start: isize,
    pub step: isize,
    pub len: usize,
}

pub(crate) fn resolve(
    len: usize,
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
) -> Result<SliceSpec, Error> {
    if step == 0 {
        return Err(Error::ZeroStep);
    }
    let n = len as isize;
    let backwards = step < 0;

    let clamp = |i: isize| -> isize {
        let i = if i < 0 { i + n } else { i };
        if i < 0 {
            if backwards { -1 } else { 0 }
        } else if i >= n {
            if backwards { n - 1 } else { n }
        } else {
            i
        }
    };

    let start = start.map_or(if backwards { n - 1 } else { 0 }, clamp);
    let stop = stop.map_or(if backwards { -1 } else { n }, clamp);

    let len = if backwards {
        if stop < start {
            ((start - stop - 1) / -step + 1) as usize
        } else {
            0
        }
    } else if start < stop {
        ((stop - start - 1) / step + 1) as usize
    } else {
        0
    };

    Ok(SliceSpec { start, step, len })
}
