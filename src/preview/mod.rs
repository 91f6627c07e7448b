// Preview encoding: JPEG compression and thumbnails.

pub mod compress;
