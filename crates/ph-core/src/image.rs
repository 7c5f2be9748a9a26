use crate::Error;
use crate::geom::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    /// Reverses row order in place (top-down storage <-> bottom-up grid).
    pub fn flip_rows(&mut self) {
        if self.width == 0 {
            return;
        }
        let h = self.height;
        for y in 0..h / 2 {
            let (head, tail) = self.data.split_at_mut((h - 1 - y) * self.width);
            head[y * self.width..(y + 1) * self.width].swap_with_slice(&mut tail[..self.width]);
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::OutOfBounds);
        }

        let min_len = min_required_len(width, height, stride).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    pub fn subview(&self, rect: Rect) -> Result<ImageView<'a, T>, Error> {
        if !rect.fits_within(self.width, self.height) {
            return Err(Error::OutOfBounds);
        }
        if rect.is_empty() {
            // May sit one past the last element; borrows nothing.
            return Ok(ImageView {
                width: rect.width,
                height: rect.height,
                stride: rect.width,
                data: &self.data[..0],
            });
        }

        let start = rect
            .y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(rect.x))
            .ok_or(Error::OutOfBounds)?;
        let min_len =
            min_required_len(rect.width, rect.height, self.stride).ok_or(Error::OutOfBounds)?;
        let tail = self.data.get(start..).ok_or(Error::OutOfBounds)?;

        if tail.len() < min_len {
            return Err(Error::OutOfBounds);
        }

        Ok(ImageView {
            width: rect.width,
            height: rect.height,
            stride: self.stride,
            data: tail,
        })
    }
}

impl<T: Clone> ImageView<'_, T> {
    pub fn to_image(&self) -> Image<T> {
        let mut data = Vec::with_capacity(self.width * self.height);
        for row in self.rows() {
            data.extend_from_slice(row);
        }

        Image {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(width)
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView};
    use crate::{Error, Rect};

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(3, 2, vec![0u8; 5]).expect_err("length mismatch");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn view_indexing_with_stride() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let view = ImageView::from_slice(3, 2, 4, &data).expect("valid view");

        assert_eq!(view.row(0), &[1, 2, 3]);
        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.get(2, 1), Some(&6));
        assert_eq!(view.get(3, 1), None);
    }

    #[test]
    fn subview_copies_region() {
        let data = vec![
            10u8, 11, 12, 13, // row 0
            20, 21, 22, 23, // row 1
            30, 31, 32, 33, // row 2
        ];
        let img = Image::from_vec(4, 3, data).expect("valid image");
        let sub = img
            .as_view()
            .subview(Rect::new(1, 1, 3, 2))
            .expect("valid subview");

        assert_eq!(sub.stride(), 4);
        assert_eq!(sub.row(0), &[21, 22, 23]);
        assert_eq!(sub.row(1), &[31, 32, 33]);

        let owned = sub.to_image();
        assert_eq!(owned.data(), &[21, 22, 23, 31, 32, 33]);
    }

    #[test]
    fn subview_out_of_bounds() {
        let img = Image::new_fill(4, 3, 0u8);
        assert_eq!(
            img.as_view().subview(Rect::new(2, 0, 3, 1)).err(),
            Some(Error::OutOfBounds)
        );
        assert!(img.as_view().subview(Rect::new(4, 3, 0, 0)).is_ok());
    }

    #[test]
    fn empty_subview_at_far_corner() {
        let img = Image::new_fill(4, 3, 7u8);
        let view = img.as_view();

        let corner = view.subview(Rect::new(4, 3, 0, 0)).expect("empty rect fits");
        assert_eq!((corner.width(), corner.height()), (0, 0));
        assert_eq!(corner.rows().count(), 0);

        let column = view.subview(Rect::new(4, 1, 0, 2)).expect("zero-width rect fits");
        assert_eq!(column.height(), 2);
        assert!(column.rows().all(<[u8]>::is_empty));
        assert!(column.to_image().data().is_empty());
    }

    #[test]
    fn flip_rows_even_and_odd_heights() {
        let mut even = Image::from_vec(2, 2, vec![1u8, 2, 3, 4]).expect("valid image");
        even.flip_rows();
        assert_eq!(even.data(), &[3, 4, 1, 2]);

        let mut odd = Image::from_vec(1, 3, vec![1u8, 2, 3]).expect("valid image");
        odd.flip_rows();
        assert_eq!(odd.data(), &[3, 2, 1]);
    }
}
