use imgeval_core::loader::Bitmap;

/// Convert a decoded RGBA bitmap to an egui ColorImage.
pub fn bitmap_to_color_image(bitmap: &Bitmap) -> egui::ColorImage {
    let size = [bitmap.width() as usize, bitmap.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, bitmap.image().as_raw())
}
