//! Fixed-size record file
//!
//! ```text
//! +----------------------+
//! | record_count (u32 LE)|  bytes 0..4
//! +----------------------+
//! | record 0             |  HEADER_SIZE + 0 * record_size
//! | record 1             |  HEADER_SIZE + 1 * record_size
//! | ...                  |
//! | record count-1       |
//! +----------------------+
//! | stale blocks (maybe) |  left behind by remove, never read
//! +----------------------+
//! ```
//!
//! The count in memory is authoritative while the store is open. It is
//! written back to the header on `sync`, on `close`, and as a last resort
//! when the store is dropped.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::record::FixedRecord;

/// Size of the record count header in bytes.
pub const HEADER_SIZE: u64 = 4;

/// A store of fixed-size records addressed by index.
pub struct RecordFile<R: FixedRecord> {
    path: PathBuf,
    file: File,
    layout: R::Layout,
    record_size: usize,
    record_count: usize,
    /// Count changed since the header was last written
    header_dirty: bool,
    _record: PhantomData<R>,
}

impl<R: FixedRecord> RecordFile<R> {
    /// Creates (or truncates) the file at `path` and writes an empty header.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::write_failed` if the file cannot be created or
    /// the header cannot be written.
    pub fn create(path: impl AsRef<Path>, layout: R::Layout) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| {
                StoreError::write_failed(
                    format!("Failed to create store file: {}", path.display()),
                    e,
                )
            })?;

        let mut store = Self {
            path,
            file,
            layout,
            record_size: R::record_size(&layout),
            record_count: 0,
            header_dirty: true,
            _record: PhantomData,
        };
        store.sync()?;

        log_event_with_fields(
            Event::StoreCreated,
            &[("kind", R::KIND), ("path", &store.path.display().to_string())],
        );

        Ok(store)
    }

    /// Opens an existing store.
    ///
    /// Returns `Ok(None)` when no file exists at `path`. Every other failure
    /// is an error: a header shorter than `HEADER_SIZE` bytes or a file too
    /// short to hold `record_count` records is reported as corruption.
    pub fn open(path: impl AsRef<Path>, layout: R::Layout) -> StoreResult<Option<Self>> {
        let path = path.as_ref().to_path_buf();
        let path_str = path.display().to_string();

        let mut file = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log_event_with_fields(
                    Event::StoreMissing,
                    &[("kind", R::KIND), ("path", &path_str)],
                );
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::io_error(
                    format!("Failed to open store file: {}", path.display()),
                    e,
                ))
            }
        };

        let mut header = [0u8; HEADER_SIZE as usize];
        if let Err(e) = file.read_exact(&mut header) {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                return Err(corruption(
                    R::KIND,
                    &path_str,
                    StoreError::corruption_at_offset(0, "Store header is truncated"),
                ));
            }
            return Err(StoreError::read_failed("Failed to read store header", e));
        }
        let record_count = u32::from_le_bytes(header) as usize;
        let record_size = R::record_size(&layout);

        let file_len = file
            .metadata()
            .map_err(|e| StoreError::io_error("Failed to read store metadata", e))?
            .len();
        let required = HEADER_SIZE + record_count as u64 * record_size as u64;
        if file_len < required {
            return Err(corruption(
                R::KIND,
                &path_str,
                StoreError::corruption_at_offset(
                    file_len,
                    format!(
                        "Header declares {} records of {} bytes but file holds {} bytes",
                        record_count, record_size, file_len
                    ),
                ),
            ));
        }

        log_event_with_fields(
            Event::StoreOpened,
            &[
                ("count", &record_count.to_string()),
                ("kind", R::KIND),
                ("path", &path_str),
            ],
        );

        Ok(Some(Self {
            path,
            file,
            layout,
            record_size,
            record_count,
            header_dirty: false,
            _record: PhantomData,
        }))
    }

    /// Opens the store at `path`, creating an empty one if it does not exist.
    pub fn open_or_create(path: impl AsRef<Path>, layout: R::Layout) -> StoreResult<Self> {
        match Self::open(path.as_ref(), layout)? {
            Some(store) => Ok(store),
            None => Self::create(path, layout),
        }
    }

    /// Writes the header, flushes to disk and releases the file.
    pub fn close(mut self) -> StoreResult<()> {
        self.sync()?;
        log_event_with_fields(
            Event::StoreClosed,
            &[
                ("count", &self.record_count.to_string()),
                ("kind", R::KIND),
                ("path", &self.path.display().to_string()),
            ],
        );
        Ok(())
    }

    /// Writes the header and fsyncs without closing the store.
    pub fn sync(&mut self) -> StoreResult<()> {
        self.write_header()?;
        self.file
            .sync_all()
            .map_err(|e| StoreError::write_failed("Failed to fsync store file", e))?;
        self.header_dirty = false;
        Ok(())
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn record_size(&self) -> usize {
        self.record_size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> &R::Layout {
        &self.layout
    }

    /// Reads the record at `index`.
    ///
    /// # Errors
    ///
    /// `INV_INDEX_OUT_OF_BOUNDS` when `index >= record_count()`,
    /// `INV_DATA_CORRUPTION` when the stored block does not decode.
    pub fn read_record(&mut self, index: usize) -> StoreResult<R> {
        self.check_index(index)?;
        let block = self.read_block(index)?;
        R::decode(&block, &self.layout).map_err(|e| {
            corruption(
                R::KIND,
                &self.path.display().to_string(),
                StoreError::corruption_at_offset(
                    self.offset(index),
                    format!("Undecodable {} record {}: {}", R::KIND, index, e),
                ),
            )
        })
    }

    /// Overwrites the record at `index`, or appends when `index` is past
    /// the end.
    pub fn write_record(&mut self, index: usize, record: &R) -> StoreResult<()> {
        if index < self.record_count {
            return self.update_record(index, record);
        }

        log_event_with_fields(
            Event::WriteFellBackToAppend,
            &[
                ("count", &self.record_count.to_string()),
                ("index", &index.to_string()),
                ("kind", R::KIND),
            ],
        );
        self.append_record(record).map(|_| ())
    }

    /// Overwrites the record at `index`; `index` must be in range.
    pub fn update_record(&mut self, index: usize, record: &R) -> StoreResult<()> {
        self.check_index(index)?;
        let block = self.encode(record)?;
        self.write_block(index, &block)?;

        log_event_with_fields(
            Event::RecordUpdated,
            &[("index", &index.to_string()), ("kind", R::KIND)],
        );
        Ok(())
    }

    /// Writes `record` after the last record and returns its index.
    pub fn append_record(&mut self, record: &R) -> StoreResult<usize> {
        let block = self.encode(record)?;
        let index = self.record_count;
        self.write_block(index, &block)?;
        self.record_count += 1;
        self.header_dirty = true;

        log_event_with_fields(
            Event::RecordAppended,
            &[("index", &index.to_string()), ("kind", R::KIND)],
        );
        Ok(index)
    }

    /// Inserts `record` at `index`, shifting `index..count` up one slot.
    ///
    /// `index == record_count()` behaves like `append_record`. The record is
    /// encoded before any block moves, so a validation failure leaves the
    /// file untouched.
    pub fn insert_record(&mut self, index: usize, record: &R) -> StoreResult<()> {
        if index > self.record_count {
            return Err(StoreError::index_out_of_bounds(index, self.record_count));
        }
        let block = self.encode(record)?;

        for i in (index + 1..=self.record_count).rev() {
            let moved = self.read_block(i - 1)?;
            self.write_block(i, &moved)?;
        }
        self.write_block(index, &block)?;
        self.record_count += 1;
        self.header_dirty = true;

        log_event_with_fields(
            Event::RecordInserted,
            &[
                ("count", &self.record_count.to_string()),
                ("index", &index.to_string()),
                ("kind", R::KIND),
            ],
        );
        Ok(())
    }

    /// Removes the record at `index`, shifting later records down one slot.
    ///
    /// The file is not truncated; the last block becomes stale.
    pub fn remove_record(&mut self, index: usize) -> StoreResult<()> {
        self.check_index(index)?;

        for i in index + 1..self.record_count {
            let moved = self.read_block(i)?;
            self.write_block(i - 1, &moved)?;
        }
        self.record_count -= 1;
        self.header_dirty = true;

        log_event_with_fields(
            Event::RecordRemoved,
            &[
                ("count", &self.record_count.to_string()),
                ("index", &index.to_string()),
                ("kind", R::KIND),
            ],
        );
        Ok(())
    }

    /// Reads every record in index order.
    pub fn read_all(&mut self) -> StoreResult<Vec<R>> {
        (0..self.record_count)
            .map(|index| self.read_record(index))
            .collect()
    }

    /// Reads the record at `index` and renders one field as text.
    pub fn field_value_as_string(&mut self, index: usize, field: R::Field) -> StoreResult<String> {
        Ok(self.read_record(index)?.field_value(field))
    }

    fn offset(&self, index: usize) -> u64 {
        HEADER_SIZE + index as u64 * self.record_size as u64
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index >= self.record_count {
            return Err(StoreError::index_out_of_bounds(index, self.record_count));
        }
        Ok(())
    }

    fn encode(&self, record: &R) -> StoreResult<Vec<u8>> {
        let block = record
            .encode(&self.layout)
            .map_err(|e| StoreError::invalid_value(R::KIND, e))?;
        if block.len() != self.record_size {
            return Err(StoreError::write_failed_no_source(format!(
                "Encoded {} record is {} bytes, expected {}",
                R::KIND,
                block.len(),
                self.record_size
            )));
        }
        Ok(block)
    }

    fn read_block(&mut self, index: usize) -> StoreResult<Vec<u8>> {
        let offset = self.offset(index);
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| StoreError::io_error(format!("Failed to seek to offset {}", offset), e))?;

        let mut block = vec![0u8; self.record_size];
        self.file.read_exact(&mut block).map_err(|e| {
            StoreError::read_failed(format!("Failed to read record {}", index), e)
        })?;
        Ok(block)
    }

    fn write_block(&mut self, index: usize, block: &[u8]) -> StoreResult<()> {
        let offset = self.offset(index);
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| StoreError::io_error(format!("Failed to seek to offset {}", offset), e))?;
        self.file.write_all(block).map_err(|e| {
            StoreError::write_failed(format!("Failed to write record {}", index), e)
        })
    }

    fn write_header(&mut self) -> StoreResult<()> {
        let count = u32::try_from(self.record_count).map_err(|_| {
            StoreError::write_failed_no_source(format!(
                "Record count {} does not fit the header",
                self.record_count
            ))
        })?;

        self.file
            .seek(SeekFrom::Start(0))
            .map_err(|e| StoreError::io_error("Failed to seek to header", e))?;
        self.file
            .write_all(&count.to_le_bytes())
            .map_err(|e| StoreError::write_failed("Failed to write store header", e))
    }
}

impl<R: FixedRecord> Drop for RecordFile<R> {
    fn drop(&mut self) {
        if !self.header_dirty {
            return;
        }

        let path = self.path.display().to_string();
        match self.sync() {
            Ok(()) => log_event_with_fields(
                Event::StoreDroppedUnclosed,
                &[
                    ("count", &self.record_count.to_string()),
                    ("kind", R::KIND),
                    ("path", &path),
                ],
            ),
            Err(e) => Logger::error(
                Event::StoreDroppedUnclosed.as_str(),
                &[("error", &e.to_string()), ("kind", R::KIND), ("path", &path)],
            ),
        }
    }
}

fn corruption(kind: &str, path: &str, err: StoreError) -> StoreError {
    log_event_with_fields(
        Event::CorruptionDetected,
        &[("error", &err.to_string()), ("kind", kind), ("path", path)],
    );
    err
}
