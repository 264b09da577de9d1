//! Bounds-checked little-endian codec driven by the schema tables.
//!
//! Both halves walk their schema field by field: every access names the
//! field it expects, and a name/type disagreement with the table is a
//! `SchemaMismatch` instead of silently corrupted bytes. The reader checks
//! the remaining length before every take, so a short buffer always
//! surfaces as `TruncatedInput` with the field it died on.

use solana_sdk::pubkey::Pubkey;
use solana_sdk::pubkey::PUBKEY_BYTES;

use crate::error::SurveyError;
use crate::schema::FieldType;
use crate::schema::Schema;
use crate::schema::MAX_SURVEY_ID_LEN;

pub struct WireWriter {
    schema: &'static Schema,
    next: usize,
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            next: 0,
            buf: Vec::with_capacity(schema.max_encoded_len()),
        }
    }

    /// Writer that appends after bytes already emitted by the caller
    /// (instruction payloads start with a discriminant byte the schema
    /// does not describe).
    pub fn with_prefix(schema: &'static Schema, prefix: &[u8]) -> Self {
        let mut writer = Self::new(schema);
        writer.buf.extend_from_slice(prefix);
        writer
    }

    fn expect(
        &mut self,
        name: &'static str,
        ty: &FieldType,
    ) -> Result<(), SurveyError> {
        let declared = self.schema.fields.get(self.next).ok_or(
            SurveyError::SchemaMismatch {
                structure: self.schema.name,
                index: self.next,
                accessed: name,
                declared: "<end of schema>",
            },
        )?;
        if declared.name != name || declared.ty != *ty {
            return Err(SurveyError::SchemaMismatch {
                structure: self.schema.name,
                index: self.next,
                accessed: name,
                declared: declared.name,
            });
        }
        self.next += 1;
        Ok(())
    }

    pub fn write_bool(
        &mut self,
        name: &'static str,
        value: bool,
    ) -> Result<(), SurveyError> {
        self.expect(name, &FieldType::Bool)?;
        self.buf.push(value as u8);
        Ok(())
    }

    pub fn write_u8(
        &mut self,
        name: &'static str,
        value: u8,
    ) -> Result<(), SurveyError> {
        self.expect(name, &FieldType::U8)?;
        self.buf.push(value);
        Ok(())
    }

    pub fn write_u32(
        &mut self,
        name: &'static str,
        value: u32,
    ) -> Result<(), SurveyError> {
        self.expect(name, &FieldType::U32)?;
        self.buf.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_u64(
        &mut self,
        name: &'static str,
        value: u64,
    ) -> Result<(), SurveyError> {
        self.expect(name, &FieldType::U64)?;
        self.buf.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_i64(
        &mut self,
        name: &'static str,
        value: i64,
    ) -> Result<(), SurveyError> {
        self.expect(name, &FieldType::I64)?;
        self.buf.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_pubkey(
        &mut self,
        name: &'static str,
        value: &Pubkey,
    ) -> Result<(), SurveyError> {
        self.expect(name, &FieldType::Pubkey)?;
        self.buf.extend_from_slice(value.as_ref());
        Ok(())
    }

    pub fn write_str(
        &mut self,
        name: &'static str,
        value: &str,
    ) -> Result<(), SurveyError> {
        self.expect(name, &FieldType::Str)?;
        if value.len() > MAX_SURVEY_ID_LEN {
            return Err(SurveyError::SurveyIdTooLong {
                len: value.len(),
                max: MAX_SURVEY_ID_LEN,
            });
        }
        self.buf
            .extend_from_slice(&(value.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    pub fn write_option_pubkey(
        &mut self,
        name: &'static str,
        value: Option<&Pubkey>,
    ) -> Result<(), SurveyError> {
        self.expect(name, &FieldType::Option(&FieldType::Pubkey))?;
        match value {
            Some(key) => {
                self.buf.push(1);
                self.buf.extend_from_slice(key.as_ref());
            }
            None => self.buf.push(0),
        }
        Ok(())
    }

    pub fn write_option_i64(
        &mut self,
        name: &'static str,
        value: Option<i64>,
    ) -> Result<(), SurveyError> {
        self.expect(name, &FieldType::Option(&FieldType::I64))?;
        match value {
            Some(v) => {
                self.buf.push(1);
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            None => self.buf.push(0),
        }
        Ok(())
    }

    /// Consumes the writer; errors if any schema field was never written.
    pub fn finish(self) -> Result<Vec<u8>, SurveyError> {
        if self.next != self.schema.fields.len() {
            return Err(SurveyError::SchemaMismatch {
                structure: self.schema.name,
                index: self.next,
                accessed: "<finish>",
                declared: self.schema.fields[self.next].name,
            });
        }
        Ok(self.buf)
    }
}

pub struct WireReader<'a> {
    schema: &'static Schema,
    data: &'a [u8],
    pos: usize,
    next: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(schema: &'static Schema, data: &'a [u8]) -> Self {
        Self {
            schema,
            data,
            pos: 0,
            next: 0,
        }
    }

    fn expect(
        &mut self,
        name: &'static str,
        ty: &FieldType,
    ) -> Result<(), SurveyError> {
        let declared = self.schema.fields.get(self.next).ok_or(
            SurveyError::SchemaMismatch {
                structure: self.schema.name,
                index: self.next,
                accessed: name,
                declared: "<end of schema>",
            },
        )?;
        if declared.name != name || declared.ty != *ty {
            return Err(SurveyError::SchemaMismatch {
                structure: self.schema.name,
                index: self.next,
                accessed: name,
                declared: declared.name,
            });
        }
        self.next += 1;
        Ok(())
    }

    fn take(
        &mut self,
        field: &'static str,
        needed: usize,
    ) -> Result<&'a [u8], SurveyError> {
        let available = self.data.len() - self.pos;
        if needed > available {
            return Err(SurveyError::TruncatedInput {
                structure: self.schema.name,
                field,
                needed,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(bytes)
    }

    pub fn read_bool(
        &mut self,
        name: &'static str,
    ) -> Result<bool, SurveyError> {
        self.expect(name, &FieldType::Bool)?;
        Ok(self.take(name, 1)?[0] != 0)
    }

    pub fn read_u8(&mut self, name: &'static str) -> Result<u8, SurveyError> {
        self.expect(name, &FieldType::U8)?;
        Ok(self.take(name, 1)?[0])
    }

    pub fn read_u32(
        &mut self,
        name: &'static str,
    ) -> Result<u32, SurveyError> {
        self.expect(name, &FieldType::U32)?;
        let bytes = self.take(name, 4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(raw))
    }

    pub fn read_u64(
        &mut self,
        name: &'static str,
    ) -> Result<u64, SurveyError> {
        self.expect(name, &FieldType::U64)?;
        let bytes = self.take(name, 8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    pub fn read_i64(
        &mut self,
        name: &'static str,
    ) -> Result<i64, SurveyError> {
        self.expect(name, &FieldType::I64)?;
        let bytes = self.take(name, 8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(i64::from_le_bytes(raw))
    }

    pub fn read_pubkey(
        &mut self,
        name: &'static str,
    ) -> Result<Pubkey, SurveyError> {
        self.expect(name, &FieldType::Pubkey)?;
        self.take_pubkey(name)
    }

    pub fn read_str(
        &mut self,
        name: &'static str,
    ) -> Result<String, SurveyError> {
        self.expect(name, &FieldType::Str)?;
        let len_bytes = self.take(name, 4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(len_bytes);
        let len = u32::from_le_bytes(raw) as usize;
        let bytes = self.take(name, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| {
            SurveyError::InvalidUtf8 {
                structure: self.schema.name,
                field: name,
            }
        })
    }

    pub fn read_option_pubkey(
        &mut self,
        name: &'static str,
    ) -> Result<Option<Pubkey>, SurveyError> {
        self.expect(name, &FieldType::Option(&FieldType::Pubkey))?;
        if self.take(name, 1)?[0] == 0 {
            return Ok(None);
        }
        Ok(Some(self.take_pubkey(name)?))
    }

    pub fn read_option_i64(
        &mut self,
        name: &'static str,
    ) -> Result<Option<i64>, SurveyError> {
        self.expect(name, &FieldType::Option(&FieldType::I64))?;
        if self.take(name, 1)?[0] == 0 {
            return Ok(None);
        }
        let bytes = self.take(name, 8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(Some(i64::from_le_bytes(raw)))
    }

    fn take_pubkey(
        &mut self,
        name: &'static str,
    ) -> Result<Pubkey, SurveyError> {
        let bytes = self.take(name, PUBKEY_BYTES)?;
        let mut raw = [0u8; PUBKEY_BYTES];
        raw.copy_from_slice(bytes);
        Ok(Pubkey::new_from_array(raw))
    }

    fn expect_all_fields_read(&self) -> Result<(), SurveyError> {
        if self.next != self.schema.fields.len() {
            return Err(SurveyError::SchemaMismatch {
                structure: self.schema.name,
                index: self.next,
                accessed: "<finish>",
                declared: self.schema.fields[self.next].name,
            });
        }
        Ok(())
    }

    /// Every byte must have been consumed. For instruction payloads and
    /// round-trip checks.
    pub fn finish_exact(self) -> Result<(), SurveyError> {
        self.expect_all_fields_read()?;
        let trailing = self.data.len() - self.pos;
        if trailing != 0 {
            return Err(SurveyError::TrailingBytes {
                structure: self.schema.name,
                count: trailing,
            });
        }
        Ok(())
    }

    /// On-chain account buffers are allocated at the schema's max size and
    /// zero-padded past the live data; tolerate that, but flag any nonzero
    /// leftover so schema drift stays detectable. Returns the padding size.
    pub fn finish_padded(self) -> Result<usize, SurveyError> {
        self.expect_all_fields_read()?;
        let trailing = &self.data[self.pos..];
        if trailing.iter().any(|byte| *byte != 0) {
            return Err(SurveyError::TrailingBytes {
                structure: self.schema.name,
                count: trailing.len(),
            });
        }
        Ok(trailing.len())
    }
}
