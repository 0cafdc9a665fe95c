use crate::error::InvalidBuffer;

/// Root-mean-square of one frame, accumulated in f64.
///
/// Rejects empty buffers and buffers holding NaN or infinity instead of
/// letting them reach the moving average.
pub fn rms(samples: &[f32]) -> Result<f64, InvalidBuffer> {
    if samples.is_empty() {
        return Err(InvalidBuffer::Empty);
    }

    let mut sum_sq = 0.0_f64;
    for (index, &value) in samples.iter().enumerate() {
        if !value.is_finite() {
            return Err(InvalidBuffer::NonFinite { index, value });
        }
        let v = value as f64;
        sum_sq += v * v;
    }

    Ok((sum_sq / samples.len() as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn constant_buffer_gives_its_magnitude() {
        for v in [0.3_f32, -0.3, 0.01, -1.0, 1.0, 1e-4] {
            for len in [1, 7, 1024] {
                let samples = vec![v; len];
                assert_relative_eq!(rms(&samples).unwrap(), v.abs() as f64, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn silence_is_zero() {
        assert_eq!(rms(&[0.0; 512]).unwrap(), 0.0);
    }

    #[test]
    fn square_wave() {
        let samples: Vec<f32> = (0..1024).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        assert_relative_eq!(rms(&samples).unwrap(), 0.5, max_relative = 1e-12);
    }

    #[test]
    fn mixed_levels() {
        // sqrt((0.36 + 0.64) / 2)
        assert_relative_eq!(rms(&[0.6, -0.8]).unwrap(), 0.5_f64.sqrt(), max_relative = 1e-6);
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(rms(&[]), Err(InvalidBuffer::Empty));
    }

    #[test]
    fn non_finite_is_rejected_with_position() {
        let mut samples = vec![0.1_f32; 16];
        samples[5] = f32::NAN;
        match rms(&samples) {
            Err(InvalidBuffer::NonFinite { index, value }) => {
                assert_eq!(index, 5);
                assert!(value.is_nan());
            }
            other => panic!("expected NonFinite, got {other:?}"),
        }

        samples[5] = f32::INFINITY;
        assert_eq!(
            rms(&samples),
            Err(InvalidBuffer::NonFinite { index: 5, value: f32::INFINITY })
        );
    }
}
