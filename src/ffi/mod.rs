use std::ffi::{c_char, CStr};
use std::ptr;
use libc::{c_double, c_int, size_t};
use tracing::error;
use crate::allocator::ThrustAllocator;
use crate::config::AllocatorConfig;
use crate::wrench::Wrench;

pub struct ThrustAllocHandle{
    inner: ThrustAllocator,
}

//returns null when the config cannot be read or is rejected
#[no_mangle]
pub unsafe extern "C" fn thrust_alloc_from_toml(path: *const c_char) -> *mut ThrustAllocHandle{
    if path.is_null(){
        return ptr::null_mut();
    }

    let path = match unsafe{ CStr::from_ptr(path) }.to_str(){
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };

    match AllocatorConfig::load(path).and_then(|config| config.build()){
        Ok(inner) => Box::into_raw(Box::new(ThrustAllocHandle{ inner })),
        Err(e) =>{
            error!("thrust allocator config rejected: {}", e);
            ptr::null_mut()
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn thrust_alloc_free(handle: *mut ThrustAllocHandle){
    if !handle.is_null(){
        unsafe{ drop(Box::from_raw(handle)); }
    }
}

#[no_mangle]
pub unsafe extern "C" fn thrust_alloc_num_thrusters(handle: *const ThrustAllocHandle) -> size_t{
    if handle.is_null(){
        return 0;
    }
    unsafe{ (*handle).inner.thruster_count() }
}

//wrench: 6 doubles [fx, fy, fz, tx, ty, tz]
//out_forces: room for max_forces doubles, out_signal: packed word
//returns number of forces written, -1 on null pointers, -2 if out_forces is too small
#[no_mangle]
pub unsafe extern "C" fn thrust_alloc_process(
    handle: *const ThrustAllocHandle,
    wrench: *const c_double,
    out_forces: *mut c_double,
    max_forces: size_t,
    out_signal: *mut u32,
) -> c_int{
    if handle.is_null() || wrench.is_null() || out_forces.is_null() || out_signal.is_null(){
        return -1;
    }

    unsafe{
        let allocator = &(*handle).inner;
        if max_forces < allocator.thruster_count(){
            return -2;
        }

        let mut values = [0.0; 6];
        ptr::copy_nonoverlapping(wrench, values.as_mut_ptr(), 6);

        let out = allocator.process(&Wrench::from_array(values));
        let forces = out.thrust.as_slice();
        ptr::copy_nonoverlapping(forces.as_ptr(), out_forces, forces.len());
        *out_signal = out.signal;
        forces.len() as c_int
    }
}

#[no_mangle]
pub unsafe extern "C" fn thrust_alloc_neutral_signal(handle: *const ThrustAllocHandle) -> u32{
    if handle.is_null(){
        return 0;
    }
    unsafe{ (*handle).inner.neutral_signal() }
}
