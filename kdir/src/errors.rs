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

//! The errors that can occur when an index is building, answering queries or reading its
//! configuration. Feature file errors are floated up from `featcloud`.

use featcloud::errors::ParsingError;
use featcloud::FeatCloudError;
use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;
use std::io;

/// Helper type for a call that could go wrong.
pub type KdirResult<T> = Result<T, KdirError>;

/// Error type for the index.
#[derive(Debug)]
pub enum KdirError {
    /// The point set or a query point was unusable: empty, of the wrong dimension, or not finite
    InvalidInput(String),
    /// Could not reserve the buffers of a KD-array
    AllocationFailure(TryReserveError),
    /// Asked for an element of an empty queue
    Empty,
    /// A queue was given a capacity of zero or a distance that isn't a finite non-negative number
    InvalidArgument(&'static str),
    /// Loading features went wrong
    FeatCloudError(FeatCloudError),
    /// IO error when opening files
    IoError(io::Error),
    /// Parsing error when loading a yaml file
    ParsingError(ParsingError),
}

impl fmt::Display for KdirError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KdirError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            KdirError::AllocationFailure(e) => write!(f, "unable to allocate the index: {}", e),
            KdirError::Empty => write!(f, "the queue is empty"),
            KdirError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            KdirError::FeatCloudError(e) => write!(f, "{}", e),
            KdirError::IoError(e) => write!(f, "{}", e),
            KdirError::ParsingError(e) => write!(f, "{}", e),
        }
    }
}

impl Error for KdirError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KdirError::AllocationFailure(e) => Some(e),
            KdirError::FeatCloudError(e) => Some(e),
            KdirError::IoError(e) => Some(e),
            KdirError::ParsingError(e) => Some(e),
            KdirError::InvalidInput(..) => None,
            KdirError::Empty => None,
            KdirError::InvalidArgument(..) => None,
        }
    }
}

impl From<FeatCloudError> for KdirError {
    fn from(err: FeatCloudError) -> Self {
        KdirError::FeatCloudError(err)
    }
}

impl From<io::Error> for KdirError {
    fn from(err: io::Error) -> Self {
        KdirError::IoError(err)
    }
}

impl From<ParsingError> for KdirError {
    fn from(err: ParsingError) -> Self {
        KdirError::ParsingError(err)
    }
}

impl From<TryReserveError> for KdirError {
    fn from(err: TryReserveError) -> Self {
        KdirError::AllocationFailure(err)
    }
}

impl From<KdirError> for io::Error {
    fn from(err: KdirError) -> Self {
        match err {
            KdirError::IoError(e) => e,
            e => io::Error::new(io::ErrorKind::Other, Box::new(e)),
        }
    }
}
