use image::{DynamicImage, RgbaImage};
use log::error;
use ph_core::{Error, Image, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagingId(pub u64);

/// A surface that can hand out its alpha plane, bottom row first.
///
/// Sources whose storage is not CPU-readable report `is_readable() == false`
/// and provide a staging path instead: `acquire_staging` blits into a
/// temporary readable copy, `read_staging_alpha` reads it back and
/// `release_staging` frees it. Callers go through [`StagingGuard`], which
/// releases on every exit path.
pub trait PixelSource {
    fn dimensions(&self) -> (usize, usize);

    fn is_readable(&self) -> bool;

    fn read_alpha(&self) -> Result<Image<u8>, Error>;

    fn acquire_staging(&self) -> Result<StagingId, Error> {
        Err(Error::StagingUnavailable)
    }

    fn read_staging_alpha(&self, _id: StagingId) -> Result<Image<u8>, Error> {
        Err(Error::StagingUnavailable)
    }

    fn release_staging(&self, _id: StagingId) {}
}

#[derive(Debug)]
pub struct StagingGuard<'a, S: PixelSource + ?Sized> {
    source: &'a S,
    id: StagingId,
}

impl<'a, S: PixelSource + ?Sized> StagingGuard<'a, S> {
    pub fn acquire(source: &'a S) -> Result<Self, Error> {
        let id = source.acquire_staging()?;
        Ok(Self { source, id })
    }

    pub fn read_alpha(&self) -> Result<Image<u8>, Error> {
        self.source.read_staging_alpha(self.id)
    }
}

impl<S: PixelSource + ?Sized> Drop for StagingGuard<'_, S> {
    fn drop(&mut self) {
        self.source.release_staging(self.id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub region: Rect,
    pub alpha: Image<u8>,
}

impl PixelBuffer {
    pub fn width(&self) -> usize {
        self.alpha.width()
    }

    pub fn height(&self) -> usize {
        self.alpha.height()
    }
}

/// Reads the alpha values inside `region`.
///
/// Readback failures are logged and reported as `None`; callers treat that
/// like an empty silhouette.
pub fn sample_region<S: PixelSource + ?Sized>(source: &S, region: Rect) -> Option<PixelBuffer> {
    match read_region(source, region) {
        Ok(buffer) => Some(buffer),
        Err(err) => {
            error!("failed to read sprite pixels in {region:?}: {err}");
            None
        }
    }
}

pub fn read_region<S: PixelSource + ?Sized>(
    source: &S,
    region: Rect,
) -> Result<PixelBuffer, Error> {
    let (w, h) = source.dimensions();
    if !region.fits_within(w, h) {
        return Err(Error::OutOfBounds);
    }

    let plane = if source.is_readable() {
        source.read_alpha()?
    } else {
        let staging = StagingGuard::acquire(source)?;
        staging.read_alpha()?
    };

    if plane.width() != w || plane.height() != h {
        return Err(Error::SizeMismatch {
            expected: w * h,
            actual: plane.width() * plane.height(),
        });
    }

    let alpha = plane.as_view().subview(region)?.to_image();
    Ok(PixelBuffer { region, alpha })
}

impl PixelSource for Image<u8> {
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn is_readable(&self) -> bool {
        true
    }

    fn read_alpha(&self) -> Result<Image<u8>, Error> {
        Ok(self.clone())
    }
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (usize, usize) {
        (self.width() as usize, self.height() as usize)
    }

    fn is_readable(&self) -> bool {
        true
    }

    fn read_alpha(&self) -> Result<Image<u8>, Error> {
        let data = self.pixels().map(|p| p.0[3]).collect();
        let mut plane = Image::from_vec(self.width() as usize, self.height() as usize, data)?;
        plane.flip_rows();
        Ok(plane)
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (usize, usize) {
        (self.width() as usize, self.height() as usize)
    }

    fn is_readable(&self) -> bool {
        true
    }

    fn read_alpha(&self) -> Result<Image<u8>, Error> {
        self.to_rgba8().read_alpha()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use image::{Rgba, RgbaImage};
    use ph_core::{Error, Image, Rect};

    use super::{PixelSource, StagingId, read_region, sample_region};

    struct LockedTexture {
        alpha: Image<u8>,
        fail_readback: bool,
        next_id: Cell<u64>,
        live: RefCell<Vec<StagingId>>,
        released: Cell<usize>,
    }

    impl LockedTexture {
        fn new(alpha: Image<u8>, fail_readback: bool) -> Self {
            Self {
                alpha,
                fail_readback,
                next_id: Cell::new(0),
                live: RefCell::new(Vec::new()),
                released: Cell::new(0),
            }
        }
    }

    impl PixelSource for LockedTexture {
        fn dimensions(&self) -> (usize, usize) {
            (self.alpha.width(), self.alpha.height())
        }

        fn is_readable(&self) -> bool {
            false
        }

        fn read_alpha(&self) -> Result<Image<u8>, Error> {
            Err(Error::NotReadable)
        }

        fn acquire_staging(&self) -> Result<StagingId, Error> {
            let id = StagingId(self.next_id.get());
            self.next_id.set(id.0 + 1);
            self.live.borrow_mut().push(id);
            Ok(id)
        }

        fn read_staging_alpha(&self, id: StagingId) -> Result<Image<u8>, Error> {
            assert!(self.live.borrow().contains(&id));
            if self.fail_readback {
                return Err(Error::Readback("device lost".into()));
            }
            Ok(self.alpha.clone())
        }

        fn release_staging(&self, id: StagingId) {
            self.live.borrow_mut().retain(|&l| l != id);
            self.released.set(self.released.get() + 1);
        }
    }

    fn ramp(w: usize, h: usize) -> Image<u8> {
        let data = (0..w * h).map(|i| i as u8).collect();
        Image::from_vec(w, h, data).expect("valid image")
    }

    #[test]
    fn readable_source_samples_subregion() {
        let src = ramp(4, 3);
        let buf = sample_region(&src, Rect::new(1, 1, 2, 2)).expect("readable");
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.alpha.data(), &[5, 6, 9, 10]);
        assert_eq!(buf.region, Rect::new(1, 1, 2, 2));
    }

    #[test]
    fn staging_copy_is_released_after_success() {
        let tex = LockedTexture::new(ramp(3, 3), false);
        let buf = sample_region(&tex, Rect::from_size(3, 3)).expect("staged read");
        assert_eq!(buf.alpha.data(), ramp(3, 3).data());
        assert_eq!(tex.released.get(), 1);
        assert!(tex.live.borrow().is_empty());
    }

    #[test]
    fn staging_copy_is_released_after_failure() {
        let tex = LockedTexture::new(ramp(3, 3), true);
        let err = read_region(&tex, Rect::from_size(3, 3)).expect_err("readback fails");
        assert_eq!(err, Error::Readback("device lost".into()));
        assert_eq!(tex.released.get(), 1);
        assert!(tex.live.borrow().is_empty());
        assert!(sample_region(&tex, Rect::from_size(3, 3)).is_none());
        assert_eq!(tex.released.get(), 2);
    }

    #[test]
    fn region_outside_surface_is_rejected_before_staging() {
        let tex = LockedTexture::new(ramp(3, 3), false);
        assert_eq!(
            read_region(&tex, Rect::new(2, 0, 2, 1)).err(),
            Some(Error::OutOfBounds)
        );
        assert_eq!(tex.next_id.get(), 0);
    }

    #[test]
    fn rgba_rows_are_flipped_to_bottom_up() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255])); // top-left in storage
        img.put_pixel(1, 1, Rgba([0, 0, 0, 7])); // bottom-right in storage

        let plane = img.read_alpha().expect("readable");
        assert_eq!(plane.get(0, 1), Some(&255));
        assert_eq!(plane.get(1, 0), Some(&7));
        assert_eq!(plane.get(0, 0), Some(&0));
    }
}
