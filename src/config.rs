//! JSON configuration for the boundary pipeline.
//!
//! Every field is optional; missing groups and fields fall back to the
//! defaults in [`crate::fbf::params`]. The parsed parameters are validated
//! before they are returned.
use crate::error::Result;
use crate::fbf::FbfParams;
use log::debug;
use std::fs;
use std::path::Path;

pub fn parse_fbf_params(json: &str) -> Result<FbfParams> {
    let params: FbfParams = serde_json::from_str(json)?;
    params.validate()?;
    Ok(params)
}

pub fn load_fbf_params(path: &Path) -> Result<FbfParams> {
    let data = fs::read_to_string(path)?;
    let params = parse_fbf_params(&data)?;
    debug!("loaded FBF params from {}: scales {:?}", path.display(), params.scales);
    Ok(params)
}
