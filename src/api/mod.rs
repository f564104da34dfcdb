pub mod transform;

pub use transform::{
    handle_dither, handle_palette, handle_quantize, AutoPaletteParams, DitherParams,
    DitherRequest, ImageData, ImageResponse, JobParams, PaletteColor, PaletteRequest,
    PaletteResponse, QuantizeRequest,
};
pub use transform::{__path_handle_dither, __path_handle_palette, __path_handle_quantize};
