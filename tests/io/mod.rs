// IO module tests
mod cloud;
mod cloud_readers;
mod cloud_utils;
mod compression;
mod csv;
mod csv_streaming;
mod glob;
mod jsonl;
mod jsonl_streaming;
mod parquet;
mod parquet_streaming;
