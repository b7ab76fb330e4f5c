use crate::conversion::Conversion;

/// The output of a successful conversion: the bytes plus how to label them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// The complete output, readable from offset 0.
    pub bytes: Vec<u8>,

    /// Media type for the response `Content-Type` (e.g. `text/vtt`).
    pub media_type: &'static str,

    /// File extension without the dot (e.g. `vtt`).
    pub extension: &'static str,
}

impl Artifact {
    /// Wrap `bytes` with the labels of the conversion that produced them.
    pub fn new(conversion: Conversion, bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            media_type: conversion.media_type(),
            extension: conversion.extension(),
        }
    }

    /// The attachment name served to clients.
    pub fn download_name(&self) -> String {
        format!("converted.{}", self.extension)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
