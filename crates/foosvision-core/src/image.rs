/// Borrowed view of an interleaved 3-channel image, row-major,
/// `data.len() == width * height * 3`. Channel semantics are opaque to this
/// crate: callers pick a color space (the reference deployment uses HSV) and
/// must express target colors in the same space.
#[derive(Clone, Copy, Debug)]
pub struct ColorImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned interleaved 3-channel image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl ColorImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * 3],
        }
    }

    pub fn view(&self) -> ColorImageView<'_> {
        ColorImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, px: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&px);
    }
}

impl<'a> ColorImageView<'a> {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Borrowed view of a single-channel image, row-major, `len == w*h`.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned single-channel image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

#[inline]
fn get_color(src: &ColorImageView<'_>, x: i32, y: i32) -> [u8; 3] {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return [0, 0, 0];
    }
    let i = (y as usize * src.width + x as usize) * 3;
    [src.data[i], src.data[i + 1], src.data[i + 2]]
}

/// Per-channel bilinear sample of a 3-channel image, rounded to `u8`.
/// Sampling is in integer-pixel coordinates (the value of pixel `(x, y)`
/// sits at coordinate `(x, y)`); out-of-bounds taps read as zero.
#[inline]
pub fn sample_bilinear_color(src: &ColorImageView<'_>, x: f32, y: f32) -> [u8; 3] {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_color(src, x0, y0);
    let p10 = get_color(src, x0 + 1, y0);
    let p01 = get_color(src, x0, y0 + 1);
    let p11 = get_color(src, x0 + 1, y0 + 1);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let a = p00[c] as f32 + fx * (p10[c] as f32 - p00[c] as f32);
        let b = p01[c] as f32 + fx * (p11[c] as f32 - p01[c] as f32);
        out[c] = (a + fy * (b - a) + 0.5).clamp(0.0, 255.0) as u8;
    }
    out
}

/// Collapse a 3-channel image to luma with Rec.601 integer weights.
pub fn to_luma(src: &ColorImageView<'_>) -> GrayImage {
    let mut out = GrayImage::new(src.width, src.height);
    for (dst, px) in out.data.iter_mut().zip(src.data.chunks_exact(3)) {
        let v = 77 * px[0] as u32 + 150 * px[1] as u32 + 29 * px[2] as u32;
        *dst = (v >> 8) as u8;
    }
    out
}
