use crate::PixelRect;

/// Errors raised when an image buffer does not match its declared shape.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },
    #[error("region {rect:?} lies outside a {width}x{height} image")]
    RegionOutOfBounds {
        rect: PixelRect,
        width: usize,
        height: usize,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Interleaved 8-bit RGB view, row-major, `len = w*h*3`.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

impl<'a> GrayImageView<'a> {
    /// Wrap a raw buffer, checking its length.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        check_len(width * height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Copy the pixels inside `rect` (half-open) into an owned image.
    pub fn crop(&self, rect: PixelRect) -> Result<GrayImage, ImageError> {
        let (x1, y1, x2, y2) = clip_check(rect, self.width, self.height)?;
        let w = x2 - x1;
        let h = y2 - y1;
        let mut data = Vec::with_capacity(w * h);
        for y in y1..y2 {
            let row = y * self.width;
            data.extend_from_slice(&self.data[row + x1..row + x2]);
        }
        Ok(GrayImage {
            width: w,
            height: h,
            data,
        })
    }

    pub fn to_owned_image(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }

    /// Copy into an `image` buffer for the `imageproc` kernels.
    ///
    /// `None` when the view's shape does not fit the buffer.
    pub fn to_luma8(&self) -> Option<::image::GrayImage> {
        let w = u32::try_from(self.width).ok()?;
        let h = u32::try_from(self.height).ok()?;
        ::image::GrayImage::from_raw(w, h, self.data.to_vec())
    }
}

impl From<::image::GrayImage> for GrayImage {
    fn from(img: ::image::GrayImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            data: img.into_raw(),
        }
    }
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Image filled with a constant value.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }

    /// Paint the half-open rectangle with `value`, clipped to the image.
    pub fn fill_rect(&mut self, rect: PixelRect, value: u8) {
        let x1 = rect.x1.clamp(0, self.width as i32) as usize;
        let x2 = rect.x2.clamp(0, self.width as i32) as usize;
        let y1 = rect.y1.clamp(0, self.height as i32) as usize;
        let y2 = rect.y2.clamp(0, self.height as i32) as usize;
        for y in y1..y2 {
            let row = y * self.width;
            self.data[row + x1..row + x2].fill(value);
        }
    }
}

impl<'a> RgbImageView<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        check_len(width * height * 3, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Luma conversion with ITU-R 601 weights.
    pub fn to_gray(&self) -> GrayImage {
        let data = self
            .data
            .chunks_exact(3)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect();
        GrayImage {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Split a frame by rows: the first `rows_top` rows and the remainder.
    ///
    /// `rows_top` is clamped to the image height.
    pub fn split_rows(&self, rows_top: usize) -> (RgbImageView<'a>, RgbImageView<'a>) {
        let rows_top = rows_top.min(self.height);
        let cut = rows_top * self.width * 3;
        let (top, bottom) = self.data.split_at(cut);
        (
            RgbImageView {
                width: self.width,
                height: rows_top,
                data: top,
            },
            RgbImageView {
                width: self.width,
                height: self.height - rows_top,
                data: bottom,
            },
        )
    }
}

#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

fn check_len(expected: usize, got: usize) -> Result<(), ImageError> {
    if expected != got {
        return Err(ImageError::InvalidBuffer { expected, got });
    }
    Ok(())
}

fn clip_check(
    rect: PixelRect,
    width: usize,
    height: usize,
) -> Result<(usize, usize, usize, usize), ImageError> {
    let inside = rect.x1 >= 0
        && rect.y1 >= 0
        && rect.x1 <= rect.x2
        && rect.y1 <= rect.y2
        && rect.x2 as usize <= width
        && rect.y2 as usize <= height;
    if !inside {
        return Err(ImageError::RegionOutOfBounds {
            rect,
            width,
            height,
        });
    }
    Ok((
        rect.x1 as usize,
        rect.y1 as usize,
        rect.x2 as usize,
        rect.y2 as usize,
    ))
}
