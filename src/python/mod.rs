use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use std::sync::Arc;
use crate::allocator::ThrustAllocator;
use crate::config::AllocatorConfig;
use crate::error::Error;
use crate::wrench::Wrench;

fn to_py_err(e: Error) -> PyErr{
    PyValueError::new_err(e.to_string())
}

#[pyclass(name = "ThrustAllocator")]
pub struct PyThrustAllocator{
    inner: Arc<ThrustAllocator>,
}

#[pymethods]
impl PyThrustAllocator{
    #[staticmethod]
    fn from_toml(path: &str) -> PyResult<Self>{
        let allocator = AllocatorConfig::load(path)
            .and_then(|config| config.build())
            .map_err(to_py_err)?;
        Ok(PyThrustAllocator{ inner: Arc::new(allocator) })
    }

    #[staticmethod]
    fn from_toml_str(contents: &str) -> PyResult<Self>{
        let allocator = AllocatorConfig::from_toml_str(contents)
            .and_then(|config| config.build())
            .map_err(to_py_err)?;
        Ok(PyThrustAllocator{ inner: Arc::new(allocator) })
    }

    //wrench as [fx, fy, fz, tx, ty, tz], returns (forces, signal)
    fn process(&self, wrench: [f64; 6]) -> (Vec<f64>, u32){
        let out = self.inner.process(&Wrench::from_array(wrench));
        (out.thrust.to_vec(), out.signal)
    }

    fn neutral_signal(&self) -> u32{
        self.inner.neutral_signal()
    }

    fn decode(&self, signal: u32) -> Vec<u32>{
        self.inner.decode(signal)
    }

    fn num_thrusters(&self) -> usize{
        self.inner.thruster_count()
    }

    fn bits_per_thruster(&self) -> u32{
        self.inner.quantization().bits()
    }
}

#[pymodule]
fn thrust_alloc(_py: Python, m: &PyModule) -> PyResult<()>{
    m.add_class::<PyThrustAllocator>()?;
    Ok(())
}

#[cfg(test)]
mod tests{
    use super::*;

    const REFERENCE: &str = include_str!("../../config/thrusters.toml");

    #[test]
    fn test_py_process(){
        let allocator = PyThrustAllocator::from_toml_str(REFERENCE).unwrap();
        assert_eq!(allocator.num_thrusters(), 8);
        assert_eq!(allocator.bits_per_thruster(), 3);

        let (forces, signal) = allocator.process([0.0; 6]);
        assert_eq!(forces.len(), 8);
        assert_eq!(signal, allocator.neutral_signal());
        assert_eq!(allocator.decode(signal), vec![4; 8]);
    }
}
