//! The yaml configuration of a query session.
//!
//! ```yaml
//! ---
//! images_directory: ./images/
//! images_prefix: img
//! images_suffix: .png
//! num_of_images: 17
//! extraction_mode: true
//! pca_dimension: 20
//! num_of_similar_images: 5
//! knn: 5
//! split_method: MAX_SPREAD
//! logger_level: 3
//! logger_filename: stdout
//! ```

use featcloud::errors::ParsingError;
use featcloud::ImageSet;
use kdir::utils::load_yaml;
use kdir::KdTreeBuilder;
use log::LevelFilter;
use std::path::Path;
use yaml_rust::Yaml;

use crate::errors::{QueryError, QueryResult};

/// Image extensions a set may use
pub const IMAGE_SUFFIXES: [&str; 4] = [".jpg", ".png", ".bmp", ".gif"];
/// Logger file name that means standard output
pub const STDOUT_LOGGER: &str = "stdout";

/// Everything a query session needs to know.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// The images the index is built over
    pub images: ImageSet,
    /// Extract the features of every image and write them to the image's `.feats` file,
    /// otherwise read the `.feats` files written by an earlier run
    pub extraction_mode: bool,
    /// Dimension of every feature
    pub pca_dimension: usize,
    /// How many images each query answers with
    pub num_of_similar_images: usize,
    /// Neighbors found per query feature
    pub knn: usize,
    /// How the tree is built
    pub builder: KdTreeBuilder,
    /// 1 for errors only up to 4 for debug output
    pub logger_level: u8,
    /// Where log lines go, `stdout` or a file appended to
    pub logger_filename: String,
}

fn missing(file_name: &str, field: &str) -> QueryError {
    QueryError::ParsingError(ParsingError::MissingYamlError {
        file_name: file_name.to_string(),
        field: field.to_string(),
    })
}

fn malformed(file_name: &str, field: &str) -> QueryError {
    QueryError::ParsingError(ParsingError::MalformedYamlError {
        file_name: file_name.to_string(),
        field: field.to_string(),
    })
}

fn yaml_string(params: &Yaml, file_name: &str, field: &str) -> QueryResult<Option<String>> {
    match &params[field] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::String(s) => Ok(Some(s.clone())),
        _ => Err(malformed(file_name, field)),
    }
}

fn yaml_int(params: &Yaml, file_name: &str, field: &str) -> QueryResult<Option<i64>> {
    match &params[field] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(i) => Ok(Some(*i)),
        _ => Err(malformed(file_name, field)),
    }
}

fn yaml_bool(params: &Yaml, file_name: &str, field: &str) -> QueryResult<Option<bool>> {
    match &params[field] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Boolean(b) => Ok(Some(*b)),
        _ => Err(malformed(file_name, field)),
    }
}

fn positive(field: &'static str, value: i64) -> QueryResult<usize> {
    if value <= 0 {
        return Err(QueryError::constraint(
            field,
            format!("{} is not positive", value),
        ));
    }
    Ok(value as usize)
}

impl QueryConfig {
    /// Reads and checks a configuration file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> QueryResult<QueryConfig> {
        let file_name = path.as_ref().to_string_lossy().to_string();
        let params = load_yaml(&path)?;
        QueryConfig::from_yaml_params(&params, &file_name)
    }

    /// Reads and checks an already parsed configuration document.
    pub fn from_yaml_params(params: &Yaml, file_name: &str) -> QueryResult<QueryConfig> {
        let directory = yaml_string(params, file_name, "images_directory")?
            .ok_or_else(|| missing(file_name, "images_directory"))?;
        let prefix = yaml_string(params, file_name, "images_prefix")?
            .ok_or_else(|| missing(file_name, "images_prefix"))?;
        let suffix = yaml_string(params, file_name, "images_suffix")?
            .ok_or_else(|| missing(file_name, "images_suffix"))?;
        if !IMAGE_SUFFIXES.contains(&suffix.as_str()) {
            return Err(QueryError::constraint(
                "images_suffix",
                format!("{:?} is not one of {:?}", suffix, IMAGE_SUFFIXES),
            ));
        }
        let num_of_images = yaml_int(params, file_name, "num_of_images")?
            .ok_or_else(|| missing(file_name, "num_of_images"))?;
        let num_of_images = positive("num_of_images", num_of_images)?;

        let extraction_mode = yaml_bool(params, file_name, "extraction_mode")?.unwrap_or(true);
        let pca_dimension = yaml_int(params, file_name, "pca_dimension")?.unwrap_or(20);
        if !(10..=28).contains(&pca_dimension) {
            return Err(QueryError::constraint(
                "pca_dimension",
                format!("{} is not between 10 and 28", pca_dimension),
            ));
        }
        let num_of_similar_images = positive(
            "num_of_similar_images",
            yaml_int(params, file_name, "num_of_similar_images")?.unwrap_or(1),
        )?;
        let knn = positive("knn", yaml_int(params, file_name, "knn")?.unwrap_or(1))?;

        let logger_level = yaml_int(params, file_name, "logger_level")?.unwrap_or(3);
        if !(1..=4).contains(&logger_level) {
            return Err(QueryError::constraint(
                "logger_level",
                format!("{} is not between 1 and 4", logger_level),
            ));
        }
        let logger_filename = yaml_string(params, file_name, "logger_filename")?
            .unwrap_or_else(|| STDOUT_LOGGER.to_string());

        let builder = KdTreeBuilder::from_yaml_params(params, file_name)?;

        Ok(QueryConfig {
            images: ImageSet::new(directory, prefix, suffix, num_of_images),
            extraction_mode,
            pca_dimension: pca_dimension as usize,
            num_of_similar_images,
            knn,
            builder,
            logger_level: logger_level as u8,
            logger_filename,
        })
    }

    /// The log level the configured logger level stands for
    pub fn level_filter(&self) -> LevelFilter {
        match self.logger_level {
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}
