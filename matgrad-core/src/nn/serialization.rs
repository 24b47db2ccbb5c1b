//! Binary weight files.
//!
//! Layout, all little-endian:
//!
//! ```text
//! i32 parameter_count
//! repeated parameter_count times:
//!     i32 rows
//!     i32 cols
//!     f64 x (rows * cols)   row-major
//! ```
//!
//! Parameters are written in [`Module::parameters`] order. Loading validates
//! the whole stream before writing anything into the graph, so a rejected file
//! leaves the model untouched.

use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::nn::module::Module;
use crate::tensor::{self, Matrix};
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Writes the values of `params` to `writer`.
pub fn write_weights<W: Write>(graph: &Graph, params: &[NodeId], writer: &mut W) -> Result<(), MatGradError> {
    write_i32(writer, to_i32(params.len(), "parameter count")?)?;
    for &param in params {
        let data = graph.data(param)?;
        let (rows, cols) = data.dim();
        write_i32(writer, to_i32(rows, "rows")?)?;
        write_i32(writer, to_i32(cols, "cols")?)?;
        for value in data.iter() {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Reads a weight stream into `params`.
///
/// Every header and value is read and checked against the current parameter
/// shapes first. Only when the full stream is valid are the parameters
/// overwritten.
///
/// # Errors
/// - `ParameterCountMismatch` when the stream holds a different number of parameters.
/// - `ParameterShapeMismatch` when any parameter has a different shape.
/// - `Io` for a truncated or unreadable stream, `InvalidData` for negative sizes.
pub fn read_weights<R: Read>(graph: &mut Graph, params: &[NodeId], reader: &mut R) -> Result<(), MatGradError> {
    let count = from_i32(read_i32(reader)?, "parameter count")?;
    if count != params.len() {
        return Err(MatGradError::ParameterCountMismatch {
            expected: params.len(),
            actual: count,
        });
    }

    let mut values: Vec<Matrix> = Vec::with_capacity(count);
    for (index, &param) in params.iter().enumerate() {
        let rows = from_i32(read_i32(reader)?, "rows")?;
        let cols = from_i32(read_i32(reader)?, "cols")?;
        let expected = graph.shape(param)?;
        if (rows, cols) != expected {
            return Err(MatGradError::ParameterShapeMismatch {
                index,
                expected,
                actual: (rows, cols),
            });
        }
        let mut data = Vec::with_capacity(rows * cols);
        let mut buf = [0u8; 8];
        for _ in 0..rows * cols {
            reader.read_exact(&mut buf)?;
            data.push(f64::from_le_bytes(buf));
        }
        values.push(tensor::from_vec(data, rows, cols)?);
    }

    for (&param, value) in params.iter().zip(values) {
        graph.set_data(param, value)?;
    }
    Ok(())
}

/// Saves every parameter of `module` to the file at `path`.
pub fn save_weights<M, P>(graph: &Graph, module: &M, path: P) -> Result<(), MatGradError>
where
    M: Module + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let params = module.parameters();
    let mut writer = BufWriter::new(File::create(path)?);
    write_weights(graph, &params, &mut writer)?;
    writer.flush()?;
    info!("Saved {} parameters to {}", params.len(), path.display());
    Ok(())
}

/// Loads the file at `path` into the parameters of `module`.
///
/// On error the module's parameters keep their previous values.
pub fn load_weights<M, P>(graph: &mut Graph, module: &M, path: P) -> Result<(), MatGradError>
where
    M: Module + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let params = module.parameters();
    let mut reader = BufReader::new(File::open(path)?);
    read_weights(graph, &params, &mut reader)?;
    info!("Loaded {} parameters from {}", params.len(), path.display());
    Ok(())
}

fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<(), MatGradError> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, MatGradError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn to_i32(value: usize, what: &str) -> Result<i32, MatGradError> {
    i32::try_from(value)
        .map_err(|_| MatGradError::InvalidData(format!("{} {} does not fit in an i32", what, value)))
}

fn from_i32(value: i32, what: &str) -> Result<usize, MatGradError> {
    usize::try_from(value)
        .map_err(|_| MatGradError::InvalidData(format!("negative {} {} in weight stream", what, value)))
}

#[cfg(test)]
#[path = "serialization_test.rs"]
mod tests;
