//! Allocation bookkeeping for [`FakeAbi`](super::FakeAbi).

use std::collections::{HashMap, HashSet};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_void};
use std::ptr;

use ots_sys::*;

use super::model::*;

/// Error reported through a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeError {
    pub code: i32,
    pub class: &'static str,
    pub message: String,
}

impl FakeError {
    pub fn new(code: i32, class: &'static str, message: impl Into<String>) -> Self {
        FakeError {
            code,
            class,
            message: message.into(),
        }
    }
}

pub const ERROR_INVALID_ARGUMENT: i32 = 1;
pub const ERROR_WRONG_HANDLE: i32 = 2;
pub const ERROR_INVALID_ADDRESS: i32 = 10;
pub const ERROR_NOT_INTEGRATED: i32 = 11;
pub const ERROR_INVALID_SEED: i32 = 20;
pub const ERROR_INVALID_LANGUAGE: i32 = 21;
pub const ERROR_LOW_ENTROPY: i32 = 30;
pub const ERROR_LENGTH_MISMATCH: i32 = 40;
pub const ERROR_TOO_FEW_VALUES: i32 = 41;
pub const ERROR_INVALID_INDICES: i32 = 42;
pub const ERROR_NOT_FOUND: i32 = 50;
pub const ERROR_REFERENCE: i32 = 51;
pub const ERROR_ADDRESS_NOT_FOUND: i32 = 60;
pub const ERROR_INVALID_TX: i32 = 70;
pub const ERROR_INVALID_OUTPUTS: i32 = 71;
pub const ERROR_INJECTED: i32 = 99;

pub fn invalid_argument(message: impl Into<String>) -> FakeError {
    FakeError::new(ERROR_INVALID_ARGUMENT, "ots::exception::InvalidArgument", message)
}

pub fn wrong_handle() -> FakeError {
    FakeError::new(ERROR_WRONG_HANDLE, "ots::exception::WrongHandleType", "Wrong handle type")
}

pub fn invalid_address(text: &str) -> FakeError {
    FakeError::new(
        ERROR_INVALID_ADDRESS,
        "ots::exception::address::Invalid",
        format!("Invalid address: '{}'", text),
    )
}

pub fn invalid_seed(message: impl Into<String>) -> FakeError {
    FakeError::new(ERROR_INVALID_SEED, "ots::exception::seed::Invalid", message)
}

pub fn not_found(what: impl Into<String>) -> FakeError {
    FakeError::new(ERROR_NOT_FOUND, "ots::exception::seed_jar::NotFound", what)
}

/// Counters exposed to tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FakeStats {
    pub results_created: usize,
    pub results_freed: usize,
    pub handles_created: usize,
    pub handles_freed: usize,
    pub objects_created: usize,
    pub objects_freed: usize,
    pub strings_freed: usize,
    pub descriptions_freed: usize,
    pub jar_wipes: usize,
}

/// Payload of a successful result.
pub enum Payload {
    None,
    Handle {
        handle_type: ots_handle_type,
        object: usize,
        reference: bool,
    },
    Text(String),
    Bytes(Vec<u8>, ots_data_type),
    Boolean(bool),
    Number(i64),
    Comparison(i64),
    Ints(Vec<c_int>),
    Handles {
        items: Vec<(ots_handle_type, usize)>,
        reference: bool,
    },
    AddressType(OTS_ADDRESS_TYPE),
    Network(OTS_NETWORK),
    SeedType(OTS_SEED_TYPE),
    AddressIndex(u32, u32),
}

/// Heap data a result points into. Kept alive until the result is freed.
enum Side {
    None,
    Text(#[allow(dead_code)] CString),
    Bytes(#[allow(dead_code)] Vec<u8>),
    Ints(#[allow(dead_code)] Vec<c_int>),
    Handles(Vec<ots_handle_t>),
    Index(#[allow(dead_code)] Box<[u32; 2]>),
}

/// Heap data a transaction description snapshot points into.
#[allow(dead_code)]
struct DescriptionStorage {
    strings: Vec<CString>,
    flows: Vec<Vec<ots_flow_vector_t>>,
    changes: Vec<Box<ots_flow_vector_t>>,
    transfers: Vec<ots_transfer_description_t>,
    tx_set: Vec<u8>,
}

pub struct JarEntry {
    pub name: String,
    pub object: usize,
    /// Wallet handed out by reference for this entry, created on first use.
    pub wallet: Option<usize>,
}

impl JarEntry {
    pub fn new(name: String, object: usize) -> Self {
        JarEntry {
            name,
            object,
            wallet: None,
        }
    }

    fn holds(&self, id: usize) -> bool {
        self.object == id || self.wallet == Some(id)
    }
}

pub struct Settings {
    pub enforce_entropy: bool,
    pub entropy_level: f64,
    pub max_account_depth: u32,
    pub max_index_depth: u32,
}

pub const DEFAULT_ENTROPY_LEVEL: f64 = 3.5;
pub const DEFAULT_MAX_ACCOUNT_DEPTH: u32 = 10;
pub const DEFAULT_MAX_INDEX_DEPTH: u32 = 100;

impl Default for Settings {
    fn default() -> Self {
        Settings {
            enforce_entropy: true,
            entropy_level: DEFAULT_ENTROPY_LEVEL,
            max_account_depth: DEFAULT_MAX_ACCOUNT_DEPTH,
            max_index_depth: DEFAULT_MAX_INDEX_DEPTH,
        }
    }
}

pub struct FakeState {
    next_id: usize,
    objects: HashMap<usize, FakeObject>,
    languages: Vec<usize>,
    pub default_languages: [usize; 2],
    results: HashMap<usize, Side>,
    handles: HashSet<usize>,
    strings: HashSet<usize>,
    descriptions: HashMap<usize, DescriptionStorage>,
    freed_objects: HashMap<usize, usize>,
    pub jar: Vec<JarEntry>,
    pub settings: Settings,
    pub stats: FakeStats,
    pub injected: Option<FakeError>,
    pub random_counter: u64,
}

impl FakeState {
    pub fn new() -> Self {
        let mut state = FakeState {
            next_id: 0x1000,
            objects: HashMap::new(),
            languages: Vec::new(),
            default_languages: [0; 2],
            results: HashMap::new(),
            handles: HashSet::new(),
            strings: HashSet::new(),
            descriptions: HashMap::new(),
            freed_objects: HashMap::new(),
            jar: Vec::new(),
            settings: Settings::default(),
            stats: FakeStats::default(),
            injected: None,
            random_counter: 0,
        };
        for language in languages() {
            let id = state.insert_object(FakeObject::Language(language));
            state.languages.push(id);
        }
        state.stats.objects_created = 0;
        state.default_languages = [state.languages[0], state.languages[0]];
        state
    }

    // Objects

    pub fn insert_object(&mut self, object: FakeObject) -> usize {
        let id = self.next_id;
        self.next_id += 0x10;
        self.objects.insert(id, object);
        self.stats.objects_created += 1;
        id
    }

    /// Insert an object whose id is a real address the caller may read
    /// through.
    pub fn insert_object_at(&mut self, id: usize, object: FakeObject) -> usize {
        assert!(!self.objects.contains_key(&id), "object {:#x} already exists", id);
        self.objects.insert(id, object);
        self.stats.objects_created += 1;
        id
    }

    pub fn free_object(&mut self, id: usize) {
        if self.languages.contains(&id) {
            panic!("language object {:#x} is static and must never be freed", id);
        }
        if self.jar.iter().any(|e| e.holds(id)) {
            panic!(
                "object {:#x} is owned by the seed jar and was freed through a handle",
                id
            );
        }
        if self.objects.remove(&id).is_none() {
            panic!("double free of object {:#x}", id);
        }
        *self.freed_objects.entry(id).or_default() += 1;
        self.stats.objects_freed += 1;
    }

    /// Drop a jar entry's object. Jar objects are wiped, not freed through handles.
    pub fn wipe_jar_object(&mut self, id: usize) {
        if self.objects.remove(&id).is_none() {
            panic!("double wipe of jar object {:#x}", id);
        }
        *self.freed_objects.entry(id).or_default() += 1;
        self.stats.jar_wipes += 1;
    }

    /// Drop the wallet cached for an entry that leaves the jar.
    pub fn drop_jar_wallet(&mut self, entry: &mut JarEntry) {
        let Some(id) = entry.wallet.take() else {
            return;
        };
        if self.objects.remove(&id).is_none() {
            panic!("double drop of jar wallet {:#x}", id);
        }
        *self.freed_objects.entry(id).or_default() += 1;
    }

    /// Wipe an entry's seed together with its cached wallet.
    pub fn wipe_jar_entry(&mut self, mut entry: JarEntry) {
        self.drop_jar_wallet(&mut entry);
        self.wipe_jar_object(entry.object);
    }

    pub fn object(&self, id: usize) -> &FakeObject {
        match self.objects.get(&id) {
            Some(object) => object,
            None if self.freed_objects.contains_key(&id) => {
                panic!("use after free of object {:#x}", id)
            }
            None => panic!("unknown object {:#x}", id),
        }
    }

    pub fn object_mut(&mut self, id: usize) -> &mut FakeObject {
        if !self.objects.contains_key(&id) {
            panic!("use after free of object {:#x}", id);
        }
        self.objects.get_mut(&id).expect("checked above")
    }

    pub fn is_live(&self, id: usize) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn free_count(&self, id: usize) -> usize {
        self.freed_objects.get(&id).copied().unwrap_or(0)
    }

    pub fn languages(&self) -> &[usize] {
        &self.languages
    }

    /// Resolve the object a handle points at, checking the handle type.
    ///
    /// # Safety
    ///
    /// `handle` must be null or point to a readable `ots_handle_t`.
    pub unsafe fn lookup(
        &self,
        handle: *const ots_handle_t,
        expected: ots_handle_type,
    ) -> Result<usize, FakeError> {
        if handle.is_null() {
            return Err(invalid_argument("Handle is null"));
        }
        let handle = unsafe { *handle };
        if handle.type_ != expected {
            return Err(wrong_handle());
        }
        let id = handle.ptr as usize;
        let object = self.object(id);
        assert_eq!(object.handle_type(), handle.type_, "handle type does not match its object");
        Ok(id)
    }

    pub fn live_objects(&self) -> usize {
        self.objects.len() - self.languages.len()
    }

    /// Objects held by the jar: seeds and the wallets cached for them.
    pub fn jar_objects(&self) -> usize {
        self.jar.len() + self.jar.iter().filter(|e| e.wallet.is_some()).count()
    }

    // Handles

    pub fn alloc_handle(&mut self, handle: ots_handle_t) -> *mut ots_handle_t {
        let ptr = Box::into_raw(Box::new(handle));
        self.handles.insert(ptr as usize);
        self.stats.handles_created += 1;
        ptr
    }

    /// # Safety
    ///
    /// `slot` must point to a readable and writable handle pointer.
    pub unsafe fn free_handle(&mut self, slot: *mut *mut ots_handle_t) {
        if slot.is_null() {
            return;
        }
        let ptr = unsafe { *slot };
        if ptr.is_null() {
            return;
        }
        if !self.handles.remove(&(ptr as usize)) {
            panic!("free of handle {:p} which is not an owned allocation", ptr);
        }
        let handle = unsafe { Box::from_raw(ptr) };
        if !handle.reference {
            self.free_object(handle.ptr as usize);
        }
        unsafe { *slot = ptr::null_mut() };
        self.stats.handles_freed += 1;
    }

    /// Release a handle allocation without touching its object.
    ///
    /// # Safety
    ///
    /// `slot` must point to a readable and writable handle pointer.
    pub unsafe fn release_handle_struct(&mut self, slot: *mut *mut ots_handle_t) {
        let ptr = unsafe { *slot };
        if !self.handles.remove(&(ptr as usize)) {
            panic!("release of handle {:p} which is not an owned allocation", ptr);
        }
        drop(unsafe { Box::from_raw(ptr) });
        unsafe { *slot = ptr::null_mut() };
        self.stats.handles_freed += 1;
    }

    pub fn owns_handle(&self, ptr: *const ots_handle_t) -> bool {
        self.handles.contains(&(ptr as usize))
    }

    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    // Results

    pub fn ok(&mut self, payload: Payload) -> *mut ots_result_t {
        let mut raw = Box::new(ots_result_t {
            result: ots_result_payload_t { number: 0 },
            type_: OTS_RESULT_NONE,
            error: no_error(),
        });
        let side = match payload {
            Payload::None => Side::None,
            Payload::Handle {
                handle_type,
                object,
                reference,
            } => {
                raw.type_ = OTS_RESULT_HANDLE;
                raw.result.handle = ots_handle_t {
                    type_: handle_type,
                    ptr: object as *mut c_void,
                    reference,
                };
                Side::None
            }
            Payload::Text(text) => {
                let text = CString::new(text).unwrap_or_default();
                raw.type_ = OTS_RESULT_STRING;
                raw.result.data = data(
                    text.as_ptr() as *mut c_void,
                    text.as_bytes().len(),
                    OTS_DATA_CHAR,
                    false,
                );
                Side::Text(text)
            }
            Payload::Bytes(mut bytes, data_type) => {
                raw.type_ = OTS_RESULT_ARRAY;
                raw.result.data =
                    data(bytes.as_mut_ptr() as *mut c_void, bytes.len(), data_type, false);
                Side::Bytes(bytes)
            }
            Payload::Boolean(value) => {
                raw.type_ = OTS_RESULT_BOOLEAN;
                raw.result.boolean = value;
                Side::None
            }
            Payload::Number(value) => {
                raw.type_ = OTS_RESULT_NUMBER;
                raw.result.number = value;
                Side::None
            }
            Payload::Comparison(value) => {
                raw.type_ = OTS_RESULT_COMPARISON;
                raw.result.number = value;
                Side::None
            }
            Payload::Ints(mut ints) => {
                raw.type_ = OTS_RESULT_ARRAY;
                raw.result.data =
                    data(ints.as_mut_ptr() as *mut c_void, ints.len(), OTS_DATA_INT, false);
                Side::Ints(ints)
            }
            Payload::Handles {
                items,
                reference,
            } => {
                let mut handles: Vec<ots_handle_t> = items
                    .into_iter()
                    .map(|(handle_type, object)| ots_handle_t {
                        type_: handle_type,
                        ptr: object as *mut c_void,
                        reference,
                    })
                    .collect();
                raw.type_ = OTS_RESULT_ARRAY;
                raw.result.data = data(
                    handles.as_mut_ptr() as *mut c_void,
                    handles.len(),
                    OTS_DATA_HANDLE,
                    reference,
                );
                Side::Handles(handles)
            }
            Payload::AddressType(value) => {
                raw.type_ = OTS_RESULT_ADDRESS_TYPE;
                raw.result.number = value as i64;
                Side::None
            }
            Payload::Network(value) => {
                raw.type_ = OTS_RESULT_NETWORK;
                raw.result.number = value as i64;
                Side::None
            }
            Payload::SeedType(value) => {
                raw.type_ = OTS_RESULT_SEED_TYPE;
                raw.result.number = value as i64;
                Side::None
            }
            Payload::AddressIndex(account, index) => {
                let mut pair = Box::new([account, index]);
                raw.type_ = OTS_RESULT_ADDRESS_INDEX;
                raw.result.data =
                    data(pair.as_mut_ptr() as *mut c_void, 2, OTS_DATA_UINT32, false);
                Side::Index(pair)
            }
        };
        self.register(raw, side)
    }

    pub fn err(&mut self, error: FakeError) -> *mut ots_result_t {
        let mut raw = Box::new(ots_result_t {
            result: ots_result_payload_t { number: 0 },
            type_: OTS_RESULT_NONE,
            error: no_error(),
        });
        raw.error.code = error.code;
        copy_into(&mut raw.error.message, &error.message);
        copy_into(&mut raw.error.cls, error.class);
        self.register(raw, Side::None)
    }

    pub fn respond(&mut self, outcome: Result<Payload, FakeError>) -> *mut ots_result_t {
        match outcome {
            Ok(payload) => self.ok(payload),
            Err(error) => self.err(error),
        }
    }

    fn register(&mut self, raw: Box<ots_result_t>, side: Side) -> *mut ots_result_t {
        let ptr = Box::into_raw(raw);
        self.results.insert(ptr as usize, side);
        self.stats.results_created += 1;
        ptr
    }

    pub fn check_result(&self, result: *const ots_result_t) {
        if !self.results.contains_key(&(result as usize)) {
            panic!("access to result {:p} which is not live", result);
        }
    }

    /// # Safety
    ///
    /// `slot` must point to a readable and writable result pointer.
    pub unsafe fn free_result(&mut self, slot: *mut *mut ots_result_t) {
        if slot.is_null() {
            return;
        }
        let ptr = unsafe { *slot };
        if ptr.is_null() {
            return;
        }
        let side = match self.results.remove(&(ptr as usize)) {
            Some(side) => side,
            None => panic!("double free of result {:p}", ptr),
        };
        let raw = unsafe { Box::from_raw(ptr) };
        if raw.error.code == 0 && raw.type_ & OTS_RESULT_HANDLE != 0 {
            let handle = unsafe { raw.result.handle };
            if !handle.reference {
                self.free_object(handle.ptr as usize);
            }
        }
        if let Side::Handles(items) = &side {
            for handle in items.iter().filter(|h| !h.reference) {
                self.free_object(handle.ptr as usize);
            }
        }
        drop(side);
        unsafe { *slot = ptr::null_mut() };
        self.stats.results_freed += 1;
    }

    pub fn live_results(&self) -> usize {
        self.results.len()
    }

    // Strings handed to the caller

    pub fn give_string(&mut self, text: String) -> *mut c_char {
        let ptr = CString::new(text).unwrap_or_default().into_raw();
        self.strings.insert(ptr as usize);
        ptr
    }

    /// # Safety
    ///
    /// `slot` must point to a readable and writable string pointer.
    pub unsafe fn free_string(&mut self, slot: *mut *mut c_char) {
        if slot.is_null() {
            return;
        }
        let ptr = unsafe { *slot };
        if ptr.is_null() {
            return;
        }
        if !self.strings.remove(&(ptr as usize)) {
            panic!("double free of string {:p}", ptr);
        }
        drop(unsafe { CString::from_raw(ptr) });
        unsafe { *slot = ptr::null_mut() };
        self.stats.strings_freed += 1;
    }

    pub fn live_strings(&self) -> usize {
        self.strings.len()
    }

    // Transaction description snapshots

    pub fn give_description(&mut self, tx: &FakeTx) -> *mut ots_tx_description_t {
        let mut storage = DescriptionStorage {
            strings: Vec::new(),
            flows: Vec::new(),
            changes: Vec::new(),
            transfers: Vec::new(),
            tx_set: tx.raw.clone(),
        };

        let outputs = flows(&mut storage, &tx.outputs);
        let change = tx.change.clone().map(|c| change_flow(&mut storage, c));
        let payment_id = string(&mut storage, "");
        let extra = string(&mut storage, "");
        storage.transfers.push(ots_transfer_description_t {
            amount_in: tx.amount_in(),
            amount_out: tx.amount_out(),
            ring_size: 16,
            unlock_time: 0,
            flows: outputs.0,
            flows_size: outputs.1,
            change: change.unwrap_or(ptr::null_mut()),
            fee: tx.fee,
            payment_id,
            dummy_outputs: 0,
            tx_extra: extra,
        });
        let outputs = flows(&mut storage, &tx.outputs);
        let change = tx.change.clone().map(|c| change_flow(&mut storage, c));

        let description = Box::new(ots_tx_description_t {
            tx_set: storage.tx_set.as_mut_ptr() as *mut c_char,
            tx_set_size: storage.tx_set.len(),
            amount_in: tx.amount_in(),
            amount_out: tx.amount_out(),
            flows: outputs.0,
            flows_size: outputs.1,
            change: change.unwrap_or(ptr::null_mut()),
            fee: tx.fee,
            transfers: storage.transfers.as_mut_ptr(),
            transfers_size: storage.transfers.len(),
        });
        let ptr = Box::into_raw(description);
        self.descriptions.insert(ptr as usize, storage);
        ptr
    }

    /// # Safety
    ///
    /// `slot` must point to a readable and writable description pointer.
    pub unsafe fn free_description(&mut self, slot: *mut *mut ots_tx_description_t) {
        if slot.is_null() {
            return;
        }
        let ptr = unsafe { *slot };
        if ptr.is_null() {
            return;
        }
        if self.descriptions.remove(&(ptr as usize)).is_none() {
            panic!("double free of transaction description {:p}", ptr);
        }
        drop(unsafe { Box::from_raw(ptr) });
        unsafe { *slot = ptr::null_mut() };
        self.stats.descriptions_freed += 1;
    }

    pub fn live_descriptions(&self) -> usize {
        self.descriptions.len()
    }

    // Entropy and randomness

    pub fn next_random(&mut self, len: usize) -> Vec<u8> {
        self.random_counter += 1;
        stream(b"fake-random", self.random_counter, len)
    }

    pub fn check_entropy(&self, data: &[u8]) -> Result<(), FakeError> {
        if self.settings.enforce_entropy && entropy(data) < self.settings.entropy_level {
            return Err(FakeError::new(
                ERROR_LOW_ENTROPY,
                "ots::exception::LowEntropy",
                "Random data has too low entropy",
            ));
        }
        Ok(())
    }
}

fn no_error() -> ots_error_t {
    ots_error_t {
        code: 0,
        message: [0; OTS_MAX_ERROR_MESSAGE],
        cls: [0; OTS_MAX_ERROR_CLASS],
    }
}

fn data(ptr: *mut c_void, size: usize, type_: ots_data_type, reference: bool) -> ots_result_data_t {
    ots_result_data_t {
        ptr,
        size,
        type_,
        reference,
    }
}

fn copy_into<const N: usize>(target: &mut [c_char; N], text: &str) {
    for (slot, byte) in target.iter_mut().zip(text.bytes().take(N - 1)) {
        *slot = byte as c_char;
    }
}

fn string(storage: &mut DescriptionStorage, text: &str) -> *mut c_char {
    let text = CString::new(text).unwrap_or_default();
    let ptr = text.as_ptr() as *mut c_char;
    storage.strings.push(text);
    ptr
}

fn flows(
    storage: &mut DescriptionStorage,
    items: &[(String, u64)],
) -> (*mut ots_flow_vector_t, usize) {
    let mut vector = Vec::with_capacity(items.len());
    for (address, amount) in items {
        vector.push(ots_flow_vector_t {
            address: string(storage, address),
            amount: *amount,
        });
    }
    let ptr = vector.as_mut_ptr();
    let len = vector.len();
    storage.flows.push(vector);
    (ptr, len)
}

fn change_flow(
    storage: &mut DescriptionStorage,
    (address, amount): (String, u64),
) -> *mut ots_flow_vector_t {
    let mut change = Box::new(ots_flow_vector_t {
        address: string(storage, &address),
        amount,
    });
    let ptr = &mut *change as *mut ots_flow_vector_t;
    storage.changes.push(change);
    ptr
}

/// Read a caller supplied C string.
///
/// # Safety
///
/// `ptr` must be null or a valid NUL terminated string.
pub unsafe fn read_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Read a caller supplied buffer.
///
/// # Safety
///
/// `ptr` must be valid for `len` bytes when `len` is non zero.
pub unsafe fn read_bytes(ptr: *const c_char, len: usize) -> Vec<u8> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    unsafe { std::slice::from_raw_parts(ptr as *const u8, len) }.to_vec()
}
