pub mod parser;

pub use parser::{
    KML_NAMESPACE, extract, extract_file, has_lon_lat_components, parse_coordinate_block,
    parse_coordinate_token,
};
