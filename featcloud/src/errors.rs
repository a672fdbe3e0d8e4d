/*
* Licensed to Elasticsearch B.V. under one or more contributor
* license agreements. See the NOTICE file distributed with
* this work for additional information regarding copyright
* ownership. Elasticsearch B.V. licenses this file to you under
* the Apache License, Version 2.0 (the "License"); you may
* not use this file except in compliance with the License.
* You may obtain a copy of the License at
*
*  http://www.apache.org/licenses/LICENSE-2.0
*
* Unless required by applicable law or agreed to in writing,
* software distributed under the License is distributed on an
* "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
* KIND, either express or implied.  See the License for the
* specific language governing permissions and limitations
* under the License.
*/

//! The errors that can occur when feature files are loading or saving
use std::error::Error;
use std::fmt;
use std::io;

/// Helper type for a call that could go wrong.
pub type FeatCloudResult<T> = Result<T, FeatCloudError>;

/// Error type for the feature layer
#[derive(Debug)]
pub enum FeatCloudError {
    /// IO error when opening files
    IoError(io::Error),
    /// Parsing error when loading a feature or yaml file
    ParsingError(ParsingError),
    /// A point had a different dimension than the rest of the file or the configured one
    DimensionMismatch {
        /// The dimension we wanted
        expected: usize,
        /// The dimension we got
        found: usize,
        /// The file the point came from
        file_name: String,
    },
    /// Asked for an image past the end of an image set
    IndexOutOfRange {
        /// The requested image index
        index: usize,
        /// The number of images in the set
        count: usize,
    },
    /// A record described a point with no coordinates
    InvalidPoint {
        /// The file the point came from
        file_name: String,
        /// The line of that file
        line_number: usize,
    },
}

impl fmt::Display for FeatCloudError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeatCloudError::IoError(e) => write!(f, "{}", e),
            FeatCloudError::ParsingError(e) => write!(f, "{}", e),
            FeatCloudError::DimensionMismatch {
                expected,
                found,
                file_name,
            } => write!(
                f,
                "expected points of dimension {} but {} has dimension {}",
                expected, file_name, found
            ),
            FeatCloudError::IndexOutOfRange { index, count } => write!(
                f,
                "image index {} is out of range for a set of {} images",
                index, count
            ),
            FeatCloudError::InvalidPoint {
                file_name,
                line_number,
            } => write!(
                f,
                "line {} of {} has no coordinates",
                line_number, file_name
            ),
        }
    }
}

impl Error for FeatCloudError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FeatCloudError::IoError(e) => Some(e),
            FeatCloudError::ParsingError(e) => Some(e),
            FeatCloudError::DimensionMismatch { .. } => None,
            FeatCloudError::IndexOutOfRange { .. } => None,
            FeatCloudError::InvalidPoint { .. } => None,
        }
    }
}

impl From<io::Error> for FeatCloudError {
    fn from(err: io::Error) -> Self {
        FeatCloudError::IoError(err)
    }
}

impl From<ParsingError> for FeatCloudError {
    fn from(err: ParsingError) -> Self {
        FeatCloudError::ParsingError(err)
    }
}

impl From<FeatCloudError> for io::Error {
    fn from(err: FeatCloudError) -> Self {
        match err {
            FeatCloudError::IoError(e) => e,
            e => io::Error::new(io::ErrorKind::Other, Box::new(e)),
        }
    }
}

impl FeatCloudError {
    /// If a point's dimension disagrees with what we expected
    pub fn dimension_mismatch(expected: usize, found: usize, file_name: String) -> FeatCloudError {
        FeatCloudError::DimensionMismatch {
            expected,
            found,
            file_name,
        }
    }

    /// If we can't find an image in a set, gives the index and the size of the set
    pub fn index_out_of_range(index: usize, count: usize) -> FeatCloudError {
        FeatCloudError::IndexOutOfRange { index, count }
    }
}

/// A parsing error occored while doing something with text
#[derive(Debug)]
pub enum ParsingError {
    /// Yaml was messed up
    MalformedYamlError {
        /// The file that was messed up
        file_name: String,
        /// The value that was messed up
        field: String,
    },
    /// A needed field was missing from the file.
    MissingYamlError {
        /// The file
        file_name: String,
        /// The missing field
        field: String,
    },
    /// An error reading a `.feats` file
    FeatsReadError {
        /// The file that the error occored in
        file_name: String,
        /// The line that was messed up, starting at 1
        line_number: usize,
        /// What we were trying to read
        key: String,
    },
    /// Something else happened parsing a string
    RegularParsingError(&'static str),
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParsingError::MalformedYamlError { file_name, field } => {
                write!(f, "there is a error reading the yaml entry {} in {}", field, file_name)
            }
            ParsingError::MissingYamlError { file_name, field } => {
                write!(f, "parameter {} is not set in {}", field, file_name)
            }
            ParsingError::FeatsReadError {
                file_name,
                line_number,
                key,
            } => write!(
                f,
                "issue reading {} on line {} of {}",
                key, line_number, file_name
            ),
            ParsingError::RegularParsingError(s) => write!(f, "Error parsing a string: {}", s),
        }
    }
}

impl Error for ParsingError {}
