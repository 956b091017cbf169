//! [`OtsAbi`] implementation of the fake library.

use std::cmp::Ordering;
use std::os::raw::{c_char, c_int};
use std::ptr;

use ots_sys::*;

use super::FakeAbi;
use super::model::*;
use super::state::*;

/// Run a result returning call: honour an injected error first, then turn the
/// body's outcome into a result allocation.
macro_rules! call {
    ($self:ident, |$st:ident| $body:block) => {{
        let mut guard = $self.state.borrow_mut();
        let $st: &mut FakeState = &mut guard;
        if let Some(error) = $st.injected.take() {
            return $st.err(error);
        }
        #[allow(unused_unsafe)]
        let outcome = (|| -> Result<Payload, FakeError> { $body })();
        $st.respond(outcome)
    }};
}

fn owned(handle_type: ots_handle_type, object: usize) -> Payload {
    Payload::Handle {
        handle_type,
        object,
        reference: false,
    }
}

fn reference(handle_type: ots_handle_type, object: usize) -> Payload {
    Payload::Handle {
        handle_type,
        object,
        reference: true,
    }
}

fn check_network(network: OTS_NETWORK) -> Result<OTS_NETWORK, FakeError> {
    match network {
        OTS_NETWORK_MAIN | OTS_NETWORK_TEST | OTS_NETWORK_STAGE => Ok(network),
        _ => Err(invalid_argument(format!("Unknown network {}", network))),
    }
}

fn check_seed_type(seed_type: OTS_SEED_TYPE) -> Result<usize, FakeError> {
    match seed_type {
        OTS_SEED_TYPE_MONERO | OTS_SEED_TYPE_POLYSEED => Ok(seed_type as usize),
        _ => Err(invalid_argument(format!("Unknown seed type {}", seed_type))),
    }
}

fn parse_values(text: &str, separator: &str, radix: u32) -> Result<Vec<u16>, FakeError> {
    let invalid = || FakeError::new(
        ERROR_INVALID_INDICES,
        "ots::exception::seed_indices::Invalid",
        "Invalid seed indices string",
    );
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let parts: Vec<String> = if separator.is_empty() {
        if text.len() % 4 != 0 || !text.is_ascii() {
            return Err(invalid());
        }
        text.as_bytes().chunks(4).map(|c| String::from_utf8_lossy(c).into_owned()).collect()
    } else {
        text.split(separator).map(str::to_string).collect()
    };
    parts.iter().map(|p| u16::from_str_radix(p.trim(), radix).map_err(|_| invalid())).collect()
}

fn ordering_value(ordering: Ordering) -> i64 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

impl FakeState {
    fn seed(&self, id: usize) -> FakeSeed {
        match self.object(id) {
            FakeObject::Seed(seed) => seed.clone(),
            other => panic!("object {:#x} is not a seed: {:?}", id, other),
        }
    }

    fn wallet(&self, id: usize) -> FakeWallet {
        match self.object(id) {
            FakeObject::Wallet(wallet) => wallet.clone(),
            other => panic!("object {:#x} is not a wallet: {:?}", id, other),
        }
    }

    fn address(&self, id: usize) -> FakeAddress {
        match self.object(id) {
            FakeObject::Address(address) => address.clone(),
            other => panic!("object {:#x} is not an address: {:?}", id, other),
        }
    }

    fn language(&self, id: usize) -> FakeLanguage {
        match self.object(id) {
            FakeObject::Language(language) => language.clone(),
            other => panic!("object {:#x} is not a language: {:?}", id, other),
        }
    }

    fn values(&self, id: usize) -> Vec<u16> {
        match self.object(id) {
            FakeObject::SeedIndices(values) => values.clone(),
            other => panic!("object {:#x} is not seed indices: {:?}", id, other),
        }
    }

    fn values_mut(&mut self, id: usize) -> &mut Vec<u16> {
        match self.object_mut(id) {
            FakeObject::SeedIndices(values) => values,
            other => panic!("object {:#x} is not seed indices: {:?}", id, other),
        }
    }

    fn find_language(&self, matches: impl Fn(&FakeLanguage) -> bool) -> Result<usize, FakeError> {
        self.languages()
            .iter()
            .copied()
            .find(|id| matches(&self.language(*id)))
            .ok_or_else(|| FakeError::new(
                ERROR_INVALID_LANGUAGE,
                "ots::exception::language::NotFound",
                "Language not found",
            ))
    }

    fn new_address(&mut self, text: String) -> Payload {
        let address = FakeAddress::parse(&text).expect("derived addresses are well formed");
        owned(OTS_HANDLE_ADDRESS, self.insert_object(FakeObject::Address(address)))
    }

    fn new_seed(&mut self, seed: FakeSeed) -> Payload {
        owned(OTS_HANDLE_SEED, self.insert_object(FakeObject::Seed(seed)))
    }

    fn new_indices(&mut self, values: Vec<u16>) -> Payload {
        owned(OTS_HANDLE_SEED_INDICES, self.insert_object(FakeObject::SeedIndices(values)))
    }

    /// Split a phrase into word values, checking every word uses one language.
    fn decode_phrase(
        &self,
        phrase: &str,
        language: Option<usize>,
    ) -> Result<(usize, Vec<u16>), FakeError> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let first = words.first().ok_or_else(|| invalid_seed("Empty seed phrase"))?;
        let language = match language {
            Some(id) => id,
            None => self
                .languages()
                .iter()
                .copied()
                .find(|id| first.starts_with(self.language(*id).code))
                .ok_or_else(|| invalid_seed("Unknown seed word"))?,
        };
        let code = self.language(language).code;
        let values = words
            .iter()
            .map(|word| {
                word.strip_prefix(code)
                    .filter(|rest| rest.len() == 4)
                    .and_then(|rest| rest.parse::<u16>().ok())
                    .filter(|value| *value < 2048)
                    .ok_or_else(|| invalid_seed(format!("Invalid seed word '{}'", word)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((language, values))
    }

    fn decode_polyseed(
        &mut self,
        phrase: &str,
        language: Option<usize>,
        network: OTS_NETWORK,
        password: &str,
        passphrase: &str,
    ) -> Result<Payload, FakeError> {
        let network = check_network(network)?;
        let (language, values) = self.decode_phrase(phrase, language)?;
        if !self.language(language).polyseed {
            return Err(invalid_seed("Language does not support polyseed"));
        }
        self.polyseed_from_values(values, network, password, passphrase)
    }

    fn polyseed_from_values(
        &mut self,
        values: Vec<u16>,
        network: OTS_NETWORK,
        password: &str,
        passphrase: &str,
    ) -> Result<Payload, FakeError> {
        if values.len() != OTS_POLYSEED_WORDS {
            return Err(invalid_seed(format!("Polyseed needs {} words", OTS_POLYSEED_WORDS)));
        }
        let values = if password.is_empty() {
            values
        } else {
            merge(&values, &password_values(password, values.len()))
        };
        let seed = FakeSeed::new(values, OTS_SEED_TYPE_POLYSEED, network, 0, 0, passphrase);
        Ok(self.new_seed(seed))
    }

    fn monero_from_values(
        &mut self,
        values: Vec<u16>,
        words: usize,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
        passphrase: &str,
    ) -> Result<Payload, FakeError> {
        let network = check_network(network)?;
        if values.len() != words {
            return Err(invalid_seed(format!("Seed needs {} words", words)));
        }
        let seed = FakeSeed::new(values, OTS_SEED_TYPE_MONERO, network, height, time, passphrase);
        Ok(self.new_seed(seed))
    }

    fn monero_from_random(
        &mut self,
        random: &[u8],
        height: u64,
        time: u64,
        network: OTS_NETWORK,
    ) -> Result<Payload, FakeError> {
        self.check_entropy(random)?;
        let values = indices_from_random(random, OTS_MONERO_SEED_WORDS, 1626);
        self.monero_from_values(values, OTS_MONERO_SEED_WORDS, height, time, network, "")
    }

    fn polyseed_from_random(
        &mut self,
        random: &[u8],
        network: OTS_NETWORK,
        time: u64,
        passphrase: &str,
    ) -> Result<Payload, FakeError> {
        let network = check_network(network)?;
        self.check_entropy(random)?;
        let values = indices_from_random(random, OTS_POLYSEED_WORDS, 2048);
        let seed = FakeSeed::new(values, OTS_SEED_TYPE_POLYSEED, network, 0, time, passphrase);
        Ok(self.new_seed(seed))
    }

    fn depths(&self, accounts: u32, indices: u32) -> (u32, u32) {
        let accounts = if accounts == 0 {
            self.settings.max_account_depth
        } else {
            accounts
        };
        let indices = if indices == 0 {
            self.settings.max_index_depth
        } else {
            indices
        };
        (accounts, indices)
    }

    fn merge_all(&self, ids: &[usize], elements: usize) -> Result<Vec<u16>, FakeError> {
        if ids.len() < 2 {
            return Err(FakeError::new(
                ERROR_TOO_FEW_VALUES,
                "ots::exception::seed_indices::TooFewValues",
                "At least two value sets are needed",
            ));
        }
        let sets: Vec<Vec<u16>> = ids.iter().map(|id| self.values(*id)).collect();
        if sets.iter().any(|s| s.len() != elements) {
            return Err(length_mismatch());
        }
        Ok(sets.iter().skip(1).fold(sets[0].clone(), |acc, s| merge(&acc, s)))
    }

    fn zero(&mut self, ids: &[usize], delete_after: bool) {
        for id in ids {
            let values = self.values_mut(*id);
            values.iter_mut().for_each(|v| *v = 0);
            if delete_after {
                values.clear();
            }
        }
    }

    fn jar_position(
        &self,
        matches: impl Fn(&FakeSeed, &JarEntry) -> bool,
    ) -> Result<usize, FakeError> {
        self.jar
            .iter()
            .position(|entry| matches(&self.seed(entry.object), entry))
            .ok_or_else(|| not_found("Seed not found in jar"))
    }

    fn jar_index(&self, index: usize) -> Result<usize, FakeError> {
        if index < self.jar.len() {
            Ok(index)
        } else {
            Err(not_found(format!("No seed at index {}", index)))
        }
    }

    fn jar_purge(&mut self, position: Result<usize, FakeError>) -> Result<Payload, FakeError> {
        let entry = self.jar.remove(position?);
        self.wipe_jar_entry(entry);
        Ok(Payload::Boolean(true))
    }

    fn jar_transfer_out(
        &mut self,
        position: Result<usize, FakeError>,
    ) -> Result<Payload, FakeError> {
        let mut entry = self.jar.remove(position?);
        self.drop_jar_wallet(&mut entry);
        Ok(owned(OTS_HANDLE_SEED, entry.object))
    }

    /// Position of the entry holding `object`.
    fn jar_slot(&self, object: usize) -> Option<usize> {
        self.jar.iter().position(|e| e.object == object)
    }

    /// The wallet the entry at `position` hands out by reference.
    fn jar_wallet(&mut self, position: usize) -> usize {
        if let Some(id) = self.jar[position].wallet {
            return id;
        }
        let wallet = self.seed(self.jar[position].object).wallet();
        let id = self.insert_object(FakeObject::Wallet(wallet));
        self.jar[position].wallet = Some(id);
        id
    }

    fn tx_warnings(&mut self, tx: &FakeTx) -> Payload {
        let items = tx
            .warnings()
            .into_iter()
            .map(|(message, severity)| {
                let warning = FakeWarning::new(&message, severity);
                let id = warning.address();
                (OTS_HANDLE_TX_WARNING, self.insert_object_at(id, FakeObject::TxWarning(warning)))
            })
            .collect();
        Payload::Handles {
            items,
            reference: false,
        }
    }

    fn jar_lookup(&self, position: Result<usize, FakeError>) -> Result<Payload, FakeError> {
        Ok(reference(OTS_HANDLE_SEED, self.jar[position?].object))
    }

    fn jar_item(&self, index: usize) -> Result<(FakeSeed, String), FakeError> {
        let entry = &self.jar[self.jar_index(index)?];
        Ok((self.seed(entry.object), entry.name.clone()))
    }

    fn signing_address(
        &self,
        wallet: &FakeWallet,
        address: &str,
    ) -> Result<String, FakeError> {
        let (accounts, indices) = self.depths(0, 0);
        wallet
            .find(address, accounts, indices)
            .map(|_| address.to_string())
            .ok_or_else(address_not_found)
    }
}

fn length_mismatch() -> FakeError {
    FakeError::new(
        ERROR_LENGTH_MISMATCH,
        "ots::exception::seed_indices::LengthMismatch",
        "Value sets have different sizes",
    )
}

fn address_not_found() -> FakeError {
    FakeError::new(
        ERROR_ADDRESS_NOT_FOUND,
        "ots::exception::wallet::AddressNotFound",
        "Address does not belong to the wallet",
    )
}

fn seed_reference(message: &str) -> FakeError {
    FakeError::new(ERROR_REFERENCE, "ots::exception::seed_jar::Reference", message)
}

/// # Safety
///
/// `seed` must be null or point to a readable handle pointer.
unsafe fn check_slot(seed: *mut *mut ots_handle_t) -> Result<(), FakeError> {
    if seed.is_null() || unsafe { (*seed).is_null() } {
        return Err(invalid_argument("Seed handle is null"));
    }
    Ok(())
}

fn parse_address(text: &str) -> Result<FakeAddress, FakeError> {
    FakeAddress::parse(text).ok_or_else(|| invalid_address(text))
}

/// # Safety
///
/// `handles` must point to `count` readable handle pointers.
unsafe fn handle_list(
    handles: *const *const ots_handle_t,
    count: usize,
) -> Vec<*const ots_handle_t> {
    if handles.is_null() {
        return Vec::new();
    }
    unsafe { std::slice::from_raw_parts(handles, count) }.to_vec()
}

impl OtsAbi for FakeAbi {
    unsafe fn ots_is_error(&self, result: *const ots_result_t) -> bool {
        self.state.borrow().check_result(result);
        unsafe { (*result).error.code != 0 }
    }

    unsafe fn ots_result_handle_is_reference(&self, result: *const ots_result_t) -> bool {
        self.state.borrow().check_result(result);
        unsafe {
            assert!((*result).type_ & OTS_RESULT_HANDLE != 0, "result does not hold a handle");
            (*result).result.handle.reference
        }
    }

    unsafe fn ots_result_handle(&self, result: *mut ots_result_t) -> *mut ots_handle_t {
        let mut state = self.state.borrow_mut();
        state.check_result(result);
        unsafe {
            assert!((*result).type_ & OTS_RESULT_HANDLE != 0, "result does not hold a handle");
            let embedded = &mut (*result).result.handle;
            if embedded.reference {
                return embedded as *mut ots_handle_t;
            }
            let copy = *embedded;
            embedded.reference = true;
            state.alloc_handle(copy)
        }
    }

    unsafe fn ots_result_string(&self, result: *const ots_result_t) -> *const c_char {
        self.state.borrow().check_result(result);
        unsafe {
            if (*result).type_ & OTS_RESULT_STRING == 0 {
                return ptr::null();
            }
            (*result).result.data.ptr as *const c_char
        }
    }

    unsafe fn ots_result_boolean(&self, result: *const ots_result_t, default_value: bool) -> bool {
        self.state.borrow().check_result(result);
        unsafe {
            if (*result).type_ & OTS_RESULT_BOOLEAN == 0 {
                return default_value;
            }
            (*result).result.boolean
        }
    }

    unsafe fn ots_result_number(&self, result: *const ots_result_t, default_value: i64) -> i64 {
        self.state.borrow().check_result(result);
        unsafe {
            if (*result).type_ & OTS_RESULT_NUMBER == 0 {
                return default_value;
            }
            (*result).result.number
        }
    }

    unsafe fn ots_result_comparison(&self, result: *const ots_result_t) -> i64 {
        self.state.borrow().check_result(result);
        unsafe {
            if (*result).type_ & OTS_RESULT_COMPARISON == 0 {
                return 0;
            }
            (*result).result.number
        }
    }

    unsafe fn ots_result_size(&self, result: *const ots_result_t) -> usize {
        self.state.borrow().check_result(result);
        unsafe {
            if (*result).type_ & (OTS_RESULT_STRING | OTS_RESULT_ARRAY) == 0 {
                return 0;
            }
            (*result).result.data.size
        }
    }

    unsafe fn ots_result_data_is_type(
        &self,
        result: *const ots_result_t,
        data_type: ots_data_type,
    ) -> bool {
        self.state.borrow().check_result(result);
        unsafe {
            (*result).type_ & (OTS_RESULT_STRING | OTS_RESULT_ARRAY) != 0
                && (*result).result.data.type_ == data_type
        }
    }

    unsafe fn ots_result_data_is_reference(&self, result: *const ots_result_t) -> bool {
        self.state.borrow().check_result(result);
        unsafe {
            (*result).type_ & (OTS_RESULT_STRING | OTS_RESULT_ARRAY) != 0
                && (*result).result.data.reference
        }
    }

    unsafe fn ots_result_array_get_handle(
        &self,
        result: *const ots_result_t,
        index: usize,
    ) -> *mut ots_handle_t {
        let mut state = self.state.borrow_mut();
        state.check_result(result);
        unsafe {
            let data = (*result).result.data;
            if (*result).type_ & OTS_RESULT_ARRAY == 0
                || data.type_ != OTS_DATA_HANDLE
                || index >= data.size
            {
                return ptr::null_mut();
            }
            let element = &mut *(data.ptr as *mut ots_handle_t).add(index);
            let copy = *element;
            element.reference = true;
            state.alloc_handle(copy)
        }
    }

    unsafe fn ots_result_handle_array_reference(
        &self,
        result: *const ots_result_t,
    ) -> *mut ots_handle_t {
        self.state.borrow().check_result(result);
        unsafe {
            let data = (*result).result.data;
            if (*result).type_ & OTS_RESULT_ARRAY == 0 || data.type_ != OTS_DATA_HANDLE {
                return ptr::null_mut();
            }
            data.ptr as *mut ots_handle_t
        }
    }

    unsafe fn ots_result_int_array_reference(&self, result: *const ots_result_t) -> *mut c_int {
        self.state.borrow().check_result(result);
        unsafe {
            let data = (*result).result.data;
            if (*result).type_ & OTS_RESULT_ARRAY == 0 || data.type_ != OTS_DATA_INT {
                return ptr::null_mut();
            }
            data.ptr as *mut c_int
        }
    }

    unsafe fn ots_result_uint8_array_reference(&self, result: *const ots_result_t) -> *mut u8 {
        self.state.borrow().check_result(result);
        unsafe {
            let data = (*result).result.data;
            if (*result).type_ & OTS_RESULT_ARRAY == 0 || data.type_ != OTS_DATA_UINT8 {
                return ptr::null_mut();
            }
            data.ptr as *mut u8
        }
    }

    unsafe fn ots_result_char_array_reference(&self, result: *const ots_result_t) -> *mut c_char {
        self.state.borrow().check_result(result);
        unsafe {
            let data = (*result).result.data;
            if (*result).type_ & OTS_RESULT_ARRAY == 0 || data.type_ != OTS_DATA_CHAR {
                return ptr::null_mut();
            }
            data.ptr as *mut c_char
        }
    }

    unsafe fn ots_result_address_type_is_type(
        &self,
        result: *const ots_result_t,
        address_type: OTS_ADDRESS_TYPE,
    ) -> bool {
        self.state.borrow().check_result(result);
        unsafe {
            (*result).type_ & OTS_RESULT_ADDRESS_TYPE != 0
                && (*result).result.number == address_type as i64
        }
    }

    unsafe fn ots_result_address_index_account(&self, result: *const ots_result_t) -> u32 {
        self.state.borrow().check_result(result);
        unsafe {
            assert!(
                (*result).type_ & OTS_RESULT_ADDRESS_INDEX != 0,
                "result does not hold an address index"
            );
            *((*result).result.data.ptr as *const u32)
        }
    }

    unsafe fn ots_result_address_index_index(&self, result: *const ots_result_t) -> u32 {
        self.state.borrow().check_result(result);
        unsafe {
            assert!(
                (*result).type_ & OTS_RESULT_ADDRESS_INDEX != 0,
                "result does not hold an address index"
            );
            *((*result).result.data.ptr as *const u32).add(1)
        }
    }

    unsafe fn ots_result_network_is_type(
        &self,
        result: *const ots_result_t,
        network: OTS_NETWORK,
    ) -> bool {
        self.state.borrow().check_result(result);
        unsafe {
            (*result).type_ & OTS_RESULT_NETWORK != 0 && (*result).result.number == network as i64
        }
    }

    unsafe fn ots_result_seed_type_is_type(
        &self,
        result: *const ots_result_t,
        seed_type: OTS_SEED_TYPE,
    ) -> bool {
        self.state.borrow().check_result(result);
        unsafe {
            (*result).type_ & OTS_RESULT_SEED_TYPE != 0
                && (*result).result.number == seed_type as i64
        }
    }

    unsafe fn ots_free_string(&self, string: *mut *mut c_char) {
        unsafe { self.state.borrow_mut().free_string(string) }
    }

    unsafe fn ots_free_result(&self, result: *mut *mut ots_result_t) {
        unsafe { self.state.borrow_mut().free_result(result) }
    }

    unsafe fn ots_free_handle(&self, handle: *mut *mut ots_handle_t) {
        unsafe { self.state.borrow_mut().free_handle(handle) }
    }

    unsafe fn ots_free_tx_description(&self, tx_description: *mut *mut ots_tx_description_t) {
        unsafe { self.state.borrow_mut().free_description(tx_description) }
    }

    unsafe fn ots_wipeable_string_create(&self, string: *const c_char) -> *mut ots_result_t {
        call!(self, |st| {
            let text = unsafe { read_str(string) };
            let text = std::ffi::CString::new(text).map_err(|_| invalid_argument("Interior NUL"))?;
            Ok(owned(
                OTS_HANDLE_WIPEABLE_STRING,
                st.insert_object(FakeObject::WipeableString(text)),
            ))
        })
    }

    unsafe fn ots_wipeable_string_compare(
        &self,
        string1: *const ots_handle_t,
        string2: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let a = unsafe { st.lookup(string1, OTS_HANDLE_WIPEABLE_STRING) }?;
            let b = unsafe { st.lookup(string2, OTS_HANDLE_WIPEABLE_STRING) }?;
            let ordering = match (st.object(a), st.object(b)) {
                (FakeObject::WipeableString(a), FakeObject::WipeableString(b)) => {
                    a.as_bytes().cmp(b.as_bytes())
                }
                _ => unreachable!("lookup checked the handle types"),
            };
            Ok(Payload::Comparison(ordering_value(ordering)))
        })
    }

    unsafe fn ots_wipeable_string_c_str(&self, string: *const ots_handle_t) -> *const c_char {
        let state = self.state.borrow();
        match unsafe { state.lookup(string, OTS_HANDLE_WIPEABLE_STRING) } {
            Ok(id) => match state.object(id) {
                FakeObject::WipeableString(text) => text.as_ptr(),
                _ => ptr::null(),
            },
            Err(_) => ptr::null(),
        }
    }

    unsafe fn ots_seed_indices_create(
        &self,
        indices: *const u16,
        size: usize,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let values = if indices.is_null() || size == 0 {
                Vec::new()
            } else {
                unsafe { std::slice::from_raw_parts(indices, size) }.to_vec()
            };
            Ok(st.new_indices(values))
        })
    }

    unsafe fn ots_seed_indices_create_from_string(
        &self,
        string: *const c_char,
        separator: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let (text, separator) = unsafe { (read_str(string), read_str(separator)) };
            let values = parse_values(&text, &separator, 10)?;
            Ok(st.new_indices(values))
        })
    }

    unsafe fn ots_seed_indices_create_from_hex(
        &self,
        hex: *const c_char,
        separator: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let (text, separator) = unsafe { (read_str(hex), read_str(separator)) };
            let values = parse_values(&text, &separator, 16)?;
            Ok(st.new_indices(values))
        })
    }

    unsafe fn ots_seed_indices_values(&self, handle: *const ots_handle_t) -> *const u16 {
        let state = self.state.borrow();
        match unsafe { state.lookup(handle, OTS_HANDLE_SEED_INDICES) } {
            Ok(id) => match state.object(id) {
                FakeObject::SeedIndices(values) => values.as_ptr(),
                _ => ptr::null(),
            },
            Err(_) => ptr::null(),
        }
    }

    unsafe fn ots_seed_indices_count(&self, handle: *const ots_handle_t) -> usize {
        let state = self.state.borrow();
        match unsafe { state.lookup(handle, OTS_HANDLE_SEED_INDICES) } {
            Ok(id) => state.values(id).len(),
            Err(_) => 0,
        }
    }

    unsafe fn ots_seed_indices_clear(&self, handle: *const ots_handle_t) {
        let mut state = self.state.borrow_mut();
        if let Ok(id) = unsafe { state.lookup(handle, OTS_HANDLE_SEED_INDICES) } {
            state.zero(&[id], true);
        }
    }

    unsafe fn ots_seed_indices_append(&self, handle: *const ots_handle_t, value: u16) {
        let mut state = self.state.borrow_mut();
        if let Ok(id) = unsafe { state.lookup(handle, OTS_HANDLE_SEED_INDICES) } {
            state.values_mut(id).push(value);
        }
    }

    unsafe fn ots_seed_indices_numeric(
        &self,
        handle: *const ots_handle_t,
        separator: *const c_char,
    ) -> *mut c_char {
        let mut state = self.state.borrow_mut();
        let Ok(id) = (unsafe { state.lookup(handle, OTS_HANDLE_SEED_INDICES) }) else {
            return ptr::null_mut();
        };
        let separator = unsafe { read_str(separator) };
        let text = state
            .values(id)
            .iter()
            .map(|v| format!("{:04}", v))
            .collect::<Vec<_>>()
            .join(&separator);
        state.give_string(text)
    }

    unsafe fn ots_seed_indices_hex(
        &self,
        handle: *const ots_handle_t,
        separator: *const c_char,
    ) -> *mut c_char {
        let mut state = self.state.borrow_mut();
        let Ok(id) = (unsafe { state.lookup(handle, OTS_HANDLE_SEED_INDICES) }) else {
            return ptr::null_mut();
        };
        let separator = unsafe { read_str(separator) };
        let text = state
            .values(id)
            .iter()
            .map(|v| format!("{:04x}", v))
            .collect::<Vec<_>>()
            .join(&separator);
        state.give_string(text)
    }

    unsafe fn ots_seed_indices_merge_values(
        &self,
        seed_indices1: *const ots_handle_t,
        seed_indices2: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let a = unsafe { st.lookup(seed_indices1, OTS_HANDLE_SEED_INDICES) }?;
            let b = unsafe { st.lookup(seed_indices2, OTS_HANDLE_SEED_INDICES) }?;
            let (a, b) = (st.values(a), st.values(b));
            if a.len() != b.len() {
                return Err(length_mismatch());
            }
            Ok(st.new_indices(merge(&a, &b)))
        })
    }

    unsafe fn ots_seed_indices_merge_with_password(
        &self,
        seed_indices: *const ots_handle_t,
        password: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let id = unsafe { st.lookup(seed_indices, OTS_HANDLE_SEED_INDICES) }?;
            let values = st.values(id);
            let password = unsafe { read_str(password) };
            Ok(st.new_indices(merge(&values, &password_values(&password, values.len()))))
        })
    }

    unsafe fn ots_seed_indices_merge_multiple_values(
        &self,
        seed_indices: *const *const ots_handle_t,
        elements: usize,
        count: usize,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let ids = unsafe { handle_list(seed_indices, count) }
                .into_iter()
                .map(|h| unsafe { st.lookup(h, OTS_HANDLE_SEED_INDICES) })
                .collect::<Result<Vec<_>, _>>()?;
            let merged = st.merge_all(&ids, elements)?;
            Ok(st.new_indices(merged))
        })
    }

    unsafe fn ots_seed_indices_merge_values_and_zero(
        &self,
        seed_indices1: *const ots_handle_t,
        seed_indices2: *const ots_handle_t,
        delete_after: bool,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let a = unsafe { st.lookup(seed_indices1, OTS_HANDLE_SEED_INDICES) }?;
            let b = unsafe { st.lookup(seed_indices2, OTS_HANDLE_SEED_INDICES) }?;
            let merged = st.merge_all(&[a, b], st.values(a).len())?;
            st.zero(&[a, b], delete_after);
            Ok(st.new_indices(merged))
        })
    }

    unsafe fn ots_seed_indices_merge_with_password_and_zero(
        &self,
        seed_indices: *const ots_handle_t,
        password: *const c_char,
        delete_after: bool,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let id = unsafe { st.lookup(seed_indices, OTS_HANDLE_SEED_INDICES) }?;
            let values = st.values(id);
            let password = unsafe { read_str(password) };
            let merged = merge(&values, &password_values(&password, values.len()));
            st.zero(&[id], delete_after);
            Ok(st.new_indices(merged))
        })
    }

    unsafe fn ots_seed_indices_merge_multiple_values_and_zero(
        &self,
        seed_indices: *const *const ots_handle_t,
        elements: usize,
        count: usize,
        delete_after: bool,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let ids = unsafe { handle_list(seed_indices, count) }
                .into_iter()
                .map(|h| unsafe { st.lookup(h, OTS_HANDLE_SEED_INDICES) })
                .collect::<Result<Vec<_>, _>>()?;
            let merged = st.merge_all(&ids, elements)?;
            st.zero(&ids, delete_after);
            Ok(st.new_indices(merged))
        })
    }

    unsafe fn ots_seed_languages(&self) -> *mut ots_result_t {
        call!(self, |st| {
            let items = st.languages().iter().map(|id| (OTS_HANDLE_SEED_LANGUAGE, *id)).collect();
            Ok(Payload::Handles {
                items,
                reference: true,
            })
        })
    }

    unsafe fn ots_seed_languages_for_type(&self, seed_type: OTS_SEED_TYPE) -> *mut ots_result_t {
        call!(self, |st| {
            check_seed_type(seed_type)?;
            let items = st
                .languages()
                .iter()
                .filter(|id| st.language(**id).supports(seed_type))
                .map(|id| (OTS_HANDLE_SEED_LANGUAGE, *id))
                .collect();
            Ok(Payload::Handles {
                items,
                reference: true,
            })
        })
    }

    unsafe fn ots_seed_language_default(&self, seed_type: OTS_SEED_TYPE) -> *mut ots_result_t {
        call!(self, |st| {
            let slot = check_seed_type(seed_type)?;
            Ok(reference(OTS_HANDLE_SEED_LANGUAGE, st.default_languages[slot]))
        })
    }

    unsafe fn ots_seed_language_set_default(
        &self,
        seed_type: OTS_SEED_TYPE,
        language: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let slot = check_seed_type(seed_type)?;
            let id = unsafe { st.lookup(language, OTS_HANDLE_SEED_LANGUAGE) }?;
            if !st.language(id).supports(seed_type) {
                return Err(FakeError::new(
                    ERROR_INVALID_LANGUAGE,
                    "ots::exception::language::NotSupported",
                    "Language does not support the seed type",
                ));
            }
            st.default_languages[slot] = id;
            Ok(reference(OTS_HANDLE_SEED_LANGUAGE, id))
        })
    }

    unsafe fn ots_seed_language_from_code(&self, code: *const c_char) -> *mut ots_result_t {
        call!(self, |st| {
            let code = unsafe { read_str(code) };
            let id = st.find_language(|l| l.code == code)?;
            Ok(reference(OTS_HANDLE_SEED_LANGUAGE, id))
        })
    }

    unsafe fn ots_seed_language_from_name(&self, name: *const c_char) -> *mut ots_result_t {
        call!(self, |st| {
            let name = unsafe { read_str(name) };
            let id = st.find_language(|l| l.name == name)?;
            Ok(reference(OTS_HANDLE_SEED_LANGUAGE, id))
        })
    }

    unsafe fn ots_seed_language_from_english_name(&self, name: *const c_char) -> *mut ots_result_t {
        call!(self, |st| {
            let name = unsafe { read_str(name) };
            let id = st.find_language(|l| l.english_name == name)?;
            Ok(reference(OTS_HANDLE_SEED_LANGUAGE, id))
        })
    }

    unsafe fn ots_seed_language_code(&self, language: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let id = unsafe { st.lookup(language, OTS_HANDLE_SEED_LANGUAGE) }?;
            Ok(Payload::Text(st.language(id).code.to_string()))
        })
    }

    unsafe fn ots_seed_language_name(&self, language: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let id = unsafe { st.lookup(language, OTS_HANDLE_SEED_LANGUAGE) }?;
            Ok(Payload::Text(st.language(id).name.to_string()))
        })
    }

    unsafe fn ots_seed_language_english_name(
        &self,
        language: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let id = unsafe { st.lookup(language, OTS_HANDLE_SEED_LANGUAGE) }?;
            Ok(Payload::Text(st.language(id).english_name.to_string()))
        })
    }

    unsafe fn ots_seed_language_supported(
        &self,
        language: *const ots_handle_t,
        seed_type: OTS_SEED_TYPE,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            check_seed_type(seed_type)?;
            let id = unsafe { st.lookup(language, OTS_HANDLE_SEED_LANGUAGE) }?;
            Ok(Payload::Boolean(st.language(id).supports(seed_type)))
        })
    }

    unsafe fn ots_seed_language_is_default(
        &self,
        language: *const ots_handle_t,
        seed_type: OTS_SEED_TYPE,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let slot = check_seed_type(seed_type)?;
            let id = unsafe { st.lookup(language, OTS_HANDLE_SEED_LANGUAGE) }?;
            Ok(Payload::Boolean(st.default_languages[slot] == id))
        })
    }

    unsafe fn ots_seed_language_equals(
        &self,
        language1: *const ots_handle_t,
        language2: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let a = unsafe { st.lookup(language1, OTS_HANDLE_SEED_LANGUAGE) }?;
            let b = unsafe { st.lookup(language2, OTS_HANDLE_SEED_LANGUAGE) }?;
            Ok(Payload::Boolean(a == b))
        })
    }

    unsafe fn ots_seed_language_equals_code(
        &self,
        language: *const ots_handle_t,
        code: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let id = unsafe { st.lookup(language, OTS_HANDLE_SEED_LANGUAGE) }?;
            let code = unsafe { read_str(code) };
            Ok(Payload::Boolean(st.language(id).code == code))
        })
    }

    unsafe fn ots_seed_phrase(
        &self,
        seed: *const ots_handle_t,
        language: *const ots_handle_t,
        password: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            let language = st.language(unsafe { st.lookup(language, OTS_HANDLE_SEED_LANGUAGE) }?);
            if !language.supports(seed.seed_type) {
                return Err(FakeError::new(
                    ERROR_INVALID_LANGUAGE,
                    "ots::exception::language::NotSupported",
                    "Language does not support the seed type",
                ));
            }
            let password = unsafe { read_str(password) };
            let phrase =
                std::ffi::CString::new(seed.phrase(language.code, &password)).unwrap_or_default();
            Ok(owned(
                OTS_HANDLE_WIPEABLE_STRING,
                st.insert_object(FakeObject::WipeableString(phrase)),
            ))
        })
    }

    unsafe fn ots_seed_phrase_for_language_code(
        &self,
        seed: *const ots_handle_t,
        language_code: *const c_char,
        password: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            let code = unsafe { read_str(language_code) };
            let language = st.language(st.find_language(|l| l.code == code)?);
            if !language.supports(seed.seed_type) {
                return Err(FakeError::new(
                    ERROR_INVALID_LANGUAGE,
                    "ots::exception::language::NotSupported",
                    "Language does not support the seed type",
                ));
            }
            let password = unsafe { read_str(password) };
            let phrase =
                std::ffi::CString::new(seed.phrase(language.code, &password)).unwrap_or_default();
            Ok(owned(
                OTS_HANDLE_WIPEABLE_STRING,
                st.insert_object(FakeObject::WipeableString(phrase)),
            ))
        })
    }

    unsafe fn ots_seed_indices(
        &self,
        seed: *const ots_handle_t,
        password: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            let password = unsafe { read_str(password) };
            let values = if password.is_empty() {
                seed.indices.clone()
            } else {
                merge(&seed.indices, &password_values(&password, seed.indices.len()))
            };
            Ok(st.new_indices(values))
        })
    }

    unsafe fn ots_seed_fingerprint(&self, seed: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            Ok(Payload::Text(seed.fingerprint()))
        })
    }

    unsafe fn ots_seed_is_legacy(&self, seed: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            Ok(Payload::Boolean(seed.legacy))
        })
    }

    unsafe fn ots_seed_type(&self, seed: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            Ok(Payload::SeedType(seed.seed_type))
        })
    }

    unsafe fn ots_seed_address(&self, seed: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            Ok(st.new_address(seed.wallet().address()))
        })
    }

    unsafe fn ots_seed_timestamp(&self, seed: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            Ok(Payload::Number(seed.timestamp as i64))
        })
    }

    unsafe fn ots_seed_height(&self, seed: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            Ok(Payload::Number(seed.height as i64))
        })
    }

    unsafe fn ots_seed_network(&self, seed: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?);
            Ok(Payload::Network(seed.network))
        })
    }

    unsafe fn ots_seed_wallet(&self, seed: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let object = unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?;
            if let Some(position) = st.jar_slot(object) {
                return Ok(reference(OTS_HANDLE_WALLET, st.jar_wallet(position)));
            }
            let wallet = st.seed(object).wallet();
            Ok(owned(OTS_HANDLE_WALLET, st.insert_object(FakeObject::Wallet(wallet))))
        })
    }

    unsafe fn ots_legacy_seed_decode(
        &self,
        phrase: *const c_char,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let phrase = unsafe { read_str(phrase) };
            let (_, values) = st.decode_phrase(&phrase, None)?;
            st.monero_from_values(values, OTS_LEGACY_SEED_WORDS, height, time, network, "")
        })
    }

    unsafe fn ots_legacy_seed_decode_indices(
        &self,
        indices: *const ots_handle_t,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let values = st.values(unsafe { st.lookup(indices, OTS_HANDLE_SEED_INDICES) }?);
            st.monero_from_values(values, OTS_LEGACY_SEED_WORDS, height, time, network, "")
        })
    }

    unsafe fn ots_monero_seed_create(
        &self,
        random: *const u8,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            if random.is_null() {
                return Err(invalid_argument("Random data is null"));
            }
            let random = unsafe { std::slice::from_raw_parts(random, 32) }.to_vec();
            st.monero_from_random(&random, height, time, network)
        })
    }

    unsafe fn ots_monero_seed_generate(
        &self,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let random = st.next_random(32);
            st.monero_from_random(&random, height, time, network)
        })
    }

    unsafe fn ots_monero_seed_decode(
        &self,
        phrase: *const c_char,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
        passphrase: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let (phrase, passphrase) = unsafe { (read_str(phrase), read_str(passphrase)) };
            let (_, values) = st.decode_phrase(&phrase, None)?;
            st.monero_from_values(values, OTS_MONERO_SEED_WORDS, height, time, network, &passphrase)
        })
    }

    unsafe fn ots_monero_seed_decode_indices(
        &self,
        indices: *const ots_handle_t,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
        passphrase: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let values = st.values(unsafe { st.lookup(indices, OTS_HANDLE_SEED_INDICES) }?);
            let passphrase = unsafe { read_str(passphrase) };
            st.monero_from_values(values, OTS_MONERO_SEED_WORDS, height, time, network, &passphrase)
        })
    }

    unsafe fn ots_polyseed_create(
        &self,
        random: *const u8,
        network: OTS_NETWORK,
        time: u64,
        passphrase: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            if random.is_null() {
                return Err(invalid_argument("Random data is null"));
            }
            let random = unsafe { std::slice::from_raw_parts(random, 19) }.to_vec();
            let passphrase = unsafe { read_str(passphrase) };
            st.polyseed_from_random(&random, network, time, &passphrase)
        })
    }

    unsafe fn ots_polyseed_generate(
        &self,
        network: OTS_NETWORK,
        time: u64,
        passphrase: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let random = st.next_random(19);
            let passphrase = unsafe { read_str(passphrase) };
            st.polyseed_from_random(&random, network, time, &passphrase)
        })
    }

    unsafe fn ots_polyseed_decode(
        &self,
        phrase: *const c_char,
        network: OTS_NETWORK,
        password: *const c_char,
        passphrase: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let (phrase, password, passphrase) = unsafe {
                (read_str(phrase), read_str(password), read_str(passphrase))
            };
            st.decode_polyseed(&phrase, None, network, &password, &passphrase)
        })
    }

    unsafe fn ots_polyseed_decode_indices(
        &self,
        indices: *const ots_handle_t,
        network: OTS_NETWORK,
        password: *const c_char,
        passphrase: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let values = st.values(unsafe { st.lookup(indices, OTS_HANDLE_SEED_INDICES) }?);
            let network = check_network(network)?;
            let (password, passphrase) = unsafe { (read_str(password), read_str(passphrase)) };
            st.polyseed_from_values(values, network, &password, &passphrase)
        })
    }

    unsafe fn ots_polyseed_decode_with_language(
        &self,
        phrase: *const c_char,
        language: *const ots_handle_t,
        network: OTS_NETWORK,
        password: *const c_char,
        passphrase: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let language = unsafe { st.lookup(language, OTS_HANDLE_SEED_LANGUAGE) }?;
            let (phrase, password, passphrase) = unsafe {
                (read_str(phrase), read_str(password), read_str(passphrase))
            };
            st.decode_polyseed(&phrase, Some(language), network, &password, &passphrase)
        })
    }

    unsafe fn ots_polyseed_decode_with_language_code(
        &self,
        phrase: *const c_char,
        language_code: *const c_char,
        network: OTS_NETWORK,
        password: *const c_char,
        passphrase: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let code = unsafe { read_str(language_code) };
            let language = st.find_language(|l| l.code == code)?;
            let (phrase, password, passphrase) = unsafe {
                (read_str(phrase), read_str(password), read_str(passphrase))
            };
            st.decode_polyseed(&phrase, Some(language), network, &password, &passphrase)
        })
    }

    unsafe fn ots_polyseed_convert_to_monero_seed(
        &self,
        polyseed: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let seed = st.seed(unsafe { st.lookup(polyseed, OTS_HANDLE_SEED) }?);
            if seed.seed_type != OTS_SEED_TYPE_POLYSEED {
                return Err(invalid_seed("Seed is not a polyseed"));
            }
            let converted = FakeSeed {
                indices: indices_from_random(&seed.secret, OTS_MONERO_SEED_WORDS, 1626),
                seed_type: OTS_SEED_TYPE_MONERO,
                legacy: false,
                ..seed
            };
            Ok(st.new_seed(converted))
        })
    }

    unsafe fn ots_address_create(&self, address: *const c_char) -> *mut ots_result_t {
        call!(self, |st| {
            let address = parse_address(&unsafe { read_str(address) })?;
            Ok(owned(OTS_HANDLE_ADDRESS, st.insert_object(FakeObject::Address(address))))
        })
    }

    unsafe fn ots_address_type(&self, address: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            Ok(Payload::AddressType(address.kind))
        })
    }

    unsafe fn ots_address_network(&self, address: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            Ok(Payload::Network(address.network))
        })
    }

    unsafe fn ots_address_fingerprint(&self, address: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            Ok(Payload::Text(address.fingerprint()))
        })
    }

    unsafe fn ots_address_is_integrated(&self, address: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            Ok(Payload::Boolean(address.kind == OTS_ADDRESS_TYPE_INTEGRATED))
        })
    }

    unsafe fn ots_address_payment_id(&self, address: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            Ok(Payload::Text(address.payment_id().unwrap_or_default()))
        })
    }

    unsafe fn ots_address_from_integrated(
        &self,
        address: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            address.base().map(Payload::Text).ok_or_else(not_integrated)
        })
    }

    unsafe fn ots_address_length(&self, address: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            Ok(Payload::Number(address.text.len() as i64))
        })
    }

    unsafe fn ots_address_base58_string(&self, address: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            Ok(Payload::Text(address.text))
        })
    }

    unsafe fn ots_address_equal(
        &self,
        address1: *const ots_handle_t,
        address2: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let a = st.address(unsafe { st.lookup(address1, OTS_HANDLE_ADDRESS) }?);
            let b = st.address(unsafe { st.lookup(address2, OTS_HANDLE_ADDRESS) }?);
            Ok(Payload::Boolean(a.text == b.text))
        })
    }

    unsafe fn ots_address_equal_string(
        &self,
        address: *const ots_handle_t,
        address_string: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            Ok(Payload::Boolean(address.text == unsafe { read_str(address_string) }))
        })
    }

    unsafe fn ots_address_string_valid(
        &self,
        address: *const c_char,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t {
        call!(self, |_st| {
            let network = check_network(network)?;
            let valid = FakeAddress::parse(&unsafe { read_str(address) })
                .is_some_and(|a| a.network == network);
            Ok(Payload::Boolean(valid))
        })
    }

    unsafe fn ots_address_string_network(&self, address: *const c_char) -> *mut ots_result_t {
        call!(self, |_st| {
            Ok(Payload::Network(parse_address(&unsafe { read_str(address) })?.network))
        })
    }

    unsafe fn ots_address_string_type(&self, address: *const c_char) -> *mut ots_result_t {
        call!(self, |_st| {
            Ok(Payload::AddressType(parse_address(&unsafe { read_str(address) })?.kind))
        })
    }

    unsafe fn ots_address_string_fingerprint(&self, address: *const c_char) -> *mut ots_result_t {
        call!(self, |_st| {
            Ok(Payload::Text(parse_address(&unsafe { read_str(address) })?.fingerprint()))
        })
    }

    unsafe fn ots_address_string_is_integrated(&self, address: *const c_char) -> *mut ots_result_t {
        call!(self, |_st| {
            let address = parse_address(&unsafe { read_str(address) })?;
            Ok(Payload::Boolean(address.kind == OTS_ADDRESS_TYPE_INTEGRATED))
        })
    }

    unsafe fn ots_address_string_payment_id(&self, address: *const c_char) -> *mut ots_result_t {
        call!(self, |_st| {
            let address = parse_address(&unsafe { read_str(address) })?;
            Ok(Payload::Text(address.payment_id().unwrap_or_default()))
        })
    }

    unsafe fn ots_address_string_integrated(&self, address: *const c_char) -> *mut ots_result_t {
        call!(self, |_st| {
            let address = parse_address(&unsafe { read_str(address) })?;
            address.base().map(Payload::Text).ok_or_else(not_integrated)
        })
    }

    unsafe fn ots_wallet_create(
        &self,
        key: *const u8,
        height: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let network = check_network(network)?;
            if key.is_null() {
                return Err(invalid_argument("Key is null"));
            }
            let mut secret = [0u8; 32];
            secret.copy_from_slice(unsafe { std::slice::from_raw_parts(key, 32) });
            let wallet = FakeWallet {
                secret,
                network,
                height,
            };
            Ok(owned(OTS_HANDLE_WALLET, st.insert_object(FakeObject::Wallet(wallet))))
        })
    }

    unsafe fn ots_wallet_height(&self, wallet: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            Ok(Payload::Number(wallet.height as i64))
        })
    }

    unsafe fn ots_wallet_address(&self, wallet: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            Ok(st.new_address(wallet.address()))
        })
    }

    unsafe fn ots_wallet_subaddress(
        &self,
        wallet: *const ots_handle_t,
        account: u32,
        index: u32,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            Ok(st.new_address(wallet.subaddress(account, index)))
        })
    }

    unsafe fn ots_wallet_accounts(
        &self,
        wallet: *const ots_handle_t,
        max: u32,
        offset: u32,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let items = (offset..offset.saturating_add(max))
                .map(|account| {
                    let address = FakeAddress::parse(&wallet.subaddress(account, 0))
                        .expect("derived addresses are well formed");
                    (OTS_HANDLE_ADDRESS, st.insert_object(FakeObject::Address(address)))
                })
                .collect();
            Ok(Payload::Handles {
                items,
                reference: false,
            })
        })
    }

    unsafe fn ots_wallet_subaddresses(
        &self,
        wallet: *const ots_handle_t,
        account: u32,
        max: u32,
        offset: u32,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let items = (offset..offset.saturating_add(max))
                .map(|index| {
                    let address = FakeAddress::parse(&wallet.subaddress(account, index))
                        .expect("derived addresses are well formed");
                    (OTS_HANDLE_ADDRESS, st.insert_object(FakeObject::Address(address)))
                })
                .collect();
            Ok(Payload::Handles {
                items,
                reference: false,
            })
        })
    }

    unsafe fn ots_wallet_has_address(
        &self,
        wallet: *const ots_handle_t,
        address: *const ots_handle_t,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            let (accounts, indices) = st.depths(max_account_depth, max_index_depth);
            Ok(Payload::Boolean(wallet.find(&address.text, accounts, indices).is_some()))
        })
    }

    unsafe fn ots_wallet_has_address_string(
        &self,
        wallet: *const ots_handle_t,
        address: *const c_char,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let address = parse_address(&unsafe { read_str(address) })?;
            let (accounts, indices) = st.depths(max_account_depth, max_index_depth);
            Ok(Payload::Boolean(wallet.find(&address.text, accounts, indices).is_some()))
        })
    }

    unsafe fn ots_wallet_address_index(
        &self,
        wallet: *const ots_handle_t,
        address: *const ots_handle_t,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let address = st.address(unsafe { st.lookup(address, OTS_HANDLE_ADDRESS) }?);
            let (accounts, indices) = st.depths(max_account_depth, max_index_depth);
            let (account, index) =
                wallet.find(&address.text, accounts, indices).ok_or_else(address_not_found)?;
            Ok(Payload::AddressIndex(account, index))
        })
    }

    unsafe fn ots_wallet_address_string_index(
        &self,
        wallet: *const ots_handle_t,
        address: *const c_char,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let address = parse_address(&unsafe { read_str(address) })?;
            let (accounts, indices) = st.depths(max_account_depth, max_index_depth);
            let (account, index) =
                wallet.find(&address.text, accounts, indices).ok_or_else(address_not_found)?;
            Ok(Payload::AddressIndex(account, index))
        })
    }

    unsafe fn ots_wallet_secret_view_key(&self, wallet: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            Ok(Payload::Text(wallet.key("secret-view")))
        })
    }

    unsafe fn ots_wallet_public_view_key(&self, wallet: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            Ok(Payload::Text(wallet.key("public-view")))
        })
    }

    unsafe fn ots_wallet_secret_spend_key(&self, wallet: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            Ok(Payload::Text(wallet.key("secret-spend")))
        })
    }

    unsafe fn ots_wallet_public_spend_key(&self, wallet: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            Ok(Payload::Text(wallet.key("public-spend")))
        })
    }

    unsafe fn ots_wallet_import_outputs(
        &self,
        wallet: *const ots_handle_t,
        outputs: *const c_char,
        outputs_size: usize,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?;
            let outputs = unsafe { read_bytes(outputs, outputs_size) };
            let text = String::from_utf8(outputs).unwrap_or_default();
            let mut lines = text.lines();
            if lines.next() != Some("FAKE-OUTPUTS") {
                return Err(FakeError::new(
                    ERROR_INVALID_OUTPUTS,
                    "ots::exception::wallet::InvalidOutputs",
                    "Invalid outputs data",
                ));
            }
            Ok(Payload::Number(lines.filter(|l| !l.trim().is_empty()).count() as i64))
        })
    }

    unsafe fn ots_wallet_export_key_images(
        &self,
        wallet: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let images = format!("FAKE-KEY-IMAGES:{}", wallet.key("key-images"));
            Ok(Payload::Bytes(images.into_bytes(), OTS_DATA_CHAR))
        })
    }

    unsafe fn ots_wallet_describe_tx(
        &self,
        wallet: *const ots_handle_t,
        unsigned_tx: *const c_char,
        unsigned_tx_size: usize,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?;
            let raw = unsafe { read_bytes(unsigned_tx, unsigned_tx_size) };
            let tx = FakeTx::parse(&raw).ok_or_else(invalid_tx)?;
            Ok(owned(OTS_HANDLE_TX_DESCRIPTION, st.insert_object(FakeObject::TxDescription(tx))))
        })
    }

    unsafe fn ots_wallet_check_tx(
        &self,
        wallet: *const ots_handle_t,
        unsigned_tx: *const ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?;
            let id = unsafe { st.lookup(unsigned_tx, OTS_HANDLE_TX_DESCRIPTION) }?;
            let tx = match st.object(id) {
                FakeObject::TxDescription(tx) => tx.clone(),
                _ => return Err(wrong_handle()),
            };
            Ok(st.tx_warnings(&tx))
        })
    }

    unsafe fn ots_wallet_check_tx_string(
        &self,
        wallet: *const ots_handle_t,
        unsigned_tx: *const c_char,
        unsigned_tx_size: usize,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?;
            let raw = unsafe { read_bytes(unsigned_tx, unsigned_tx_size) };
            let tx = FakeTx::parse(&raw).ok_or_else(invalid_tx)?;
            Ok(st.tx_warnings(&tx))
        })
    }

    unsafe fn ots_wallet_sign_transaction(
        &self,
        wallet: *const ots_handle_t,
        unsigned_tx: *const c_char,
        unsigned_tx_size: usize,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let raw = unsafe { read_bytes(unsigned_tx, unsigned_tx_size) };
            FakeTx::parse(&raw).ok_or_else(invalid_tx)?;
            let digest = blake3::Hasher::new().update(&wallet.secret).update(&raw).finalize();
            let signed = format!("FAKE-SIGNED-TX:{}", hex::encode(digest.as_bytes()));
            Ok(Payload::Bytes(signed.into_bytes(), OTS_DATA_CHAR))
        })
    }

    unsafe fn ots_wallet_sign_data(
        &self,
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let data = unsafe { read_bytes(data, data_size) };
            Ok(Payload::Text(signature(&wallet.address(), &data, "SigV2")))
        })
    }

    unsafe fn ots_wallet_sign_data_with_index(
        &self,
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        account: u32,
        subaddr: u32,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let data = unsafe { read_bytes(data, data_size) };
            Ok(Payload::Text(signature(&wallet.subaddress(account, subaddr), &data, "SigV2")))
        })
    }

    unsafe fn ots_wallet_sign_data_with_address_string(
        &self,
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        address: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let data = unsafe { read_bytes(data, data_size) };
            let address = parse_address(&unsafe { read_str(address) })?;
            let address = st.signing_address(&wallet, &address.text)?;
            Ok(Payload::Text(signature(&address, &data, "SigV2")))
        })
    }

    unsafe fn ots_wallet_verify_data(
        &self,
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        signature_: *const c_char,
        legacy_fallback: bool,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let data = unsafe { read_bytes(data, data_size) };
            let given = unsafe { read_str(signature_) };
            Ok(Payload::Boolean(verify(&wallet.address(), &data, &given, legacy_fallback)))
        })
    }

    unsafe fn ots_wallet_verify_data_with_index(
        &self,
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        account: u32,
        subaddr: u32,
        signature_: *const c_char,
        legacy_fallback: bool,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let wallet = st.wallet(unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?);
            let data = unsafe { read_bytes(data, data_size) };
            let given = unsafe { read_str(signature_) };
            Ok(Payload::Boolean(verify(
                &wallet.subaddress(account, subaddr),
                &data,
                &given,
                legacy_fallback,
            )))
        })
    }

    unsafe fn ots_wallet_verify_data_with_address_string(
        &self,
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        address: *const c_char,
        signature_: *const c_char,
        legacy_fallback: bool,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            unsafe { st.lookup(wallet, OTS_HANDLE_WALLET) }?;
            let data = unsafe { read_bytes(data, data_size) };
            let address = parse_address(&unsafe { read_str(address) })?;
            let given = unsafe { read_str(signature_) };
            Ok(Payload::Boolean(verify(&address.text, &data, &given, legacy_fallback)))
        })
    }

    unsafe fn ots_tx_description(
        &self,
        tx_description: *const ots_handle_t,
    ) -> *mut ots_tx_description_t {
        let mut state = self.state.borrow_mut();
        let Ok(id) = (unsafe { state.lookup(tx_description, OTS_HANDLE_TX_DESCRIPTION) }) else {
            return ptr::null_mut();
        };
        let tx = match state.object(id) {
            FakeObject::TxDescription(tx) => tx.clone(),
            _ => return ptr::null_mut(),
        };
        state.give_description(&tx)
    }

    unsafe fn ots_seed_jar_add_seed(
        &self,
        seed: *mut ots_handle_t,
        name: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let object = unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?;
            if unsafe { (*seed).reference } {
                return Err(seed_reference("Cannot add a seed reference to the jar"));
            }
            st.jar.push(JarEntry::new(unsafe { read_str(name) }, object));
            unsafe { (*seed).reference = true };
            Ok(reference(OTS_HANDLE_SEED, object))
        })
    }

    unsafe fn ots_seed_jar_remove_seed(&self, seed: *mut *mut ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            unsafe { check_slot(seed) }?;
            let object = unsafe { st.lookup(*seed, OTS_HANDLE_SEED) }?;
            let removed = match st.jar_slot(object) {
                Some(position) => {
                    let entry = st.jar.remove(position);
                    st.wipe_jar_entry(entry);
                    unsafe { st.release_handle_struct(seed) };
                    true
                }
                None => {
                    unsafe { st.free_handle(seed) };
                    false
                }
            };
            Ok(Payload::Boolean(removed))
        })
    }

    unsafe fn ots_seed_jar_purge_seed_for_index(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| {
            let position = st.jar_index(index);
            st.jar_purge(position)
        })
    }

    unsafe fn ots_seed_jar_purge_seed_for_name(&self, name: *const c_char) -> *mut ots_result_t {
        call!(self, |st| {
            let name = unsafe { read_str(name) };
            let position = st.jar_position(|_, entry| entry.name == name);
            st.jar_purge(position)
        })
    }

    unsafe fn ots_seed_jar_purge_seed_for_fingerprint(
        &self,
        fingerprint: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let fingerprint = unsafe { read_str(fingerprint) };
            let position = st.jar_position(|seed, _| seed.fingerprint() == fingerprint);
            st.jar_purge(position)
        })
    }

    unsafe fn ots_seed_jar_purge_seed_for_address(
        &self,
        address: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let address = unsafe { read_str(address) };
            let position = st.jar_position(|seed, _| seed.wallet().address() == address);
            st.jar_purge(position)
        })
    }

    unsafe fn ots_seed_jar_transfer_seed_in(
        &self,
        seed: *mut *mut ots_handle_t,
        name: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            unsafe { check_slot(seed) }?;
            let object = unsafe { st.lookup(*seed, OTS_HANDLE_SEED) }?;
            if unsafe { (**seed).reference } {
                return Err(seed_reference("Cannot transfer a seed reference into the jar"));
            }
            st.jar.push(JarEntry::new(unsafe { read_str(name) }, object));
            unsafe { st.release_handle_struct(seed) };
            Ok(reference(OTS_HANDLE_SEED, object))
        })
    }

    unsafe fn ots_seed_jar_transfer_seed_out(
        &self,
        seed: *mut *mut ots_handle_t,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            unsafe { check_slot(seed) }?;
            let object = unsafe { st.lookup(*seed, OTS_HANDLE_SEED) }?;
            let position = st.jar_slot(object).ok_or_else(|| not_found("Seed is not in the jar"))?;
            let mut entry = st.jar.remove(position);
            st.drop_jar_wallet(&mut entry);
            unsafe { st.release_handle_struct(seed) };
            Ok(owned(OTS_HANDLE_SEED, entry.object))
        })
    }

    unsafe fn ots_seed_jar_transfer_seed_out_for_index(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| {
            let position = st.jar_index(index);
            st.jar_transfer_out(position)
        })
    }

    unsafe fn ots_seed_jar_transfer_seed_out_for_name(
        &self,
        name: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let name = unsafe { read_str(name) };
            let position = st.jar_position(|_, entry| entry.name == name);
            st.jar_transfer_out(position)
        })
    }

    unsafe fn ots_seed_jar_transfer_seed_out_for_fingerprint(
        &self,
        fingerprint: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let fingerprint = unsafe { read_str(fingerprint) };
            let position = st.jar_position(|seed, _| seed.fingerprint() == fingerprint);
            st.jar_transfer_out(position)
        })
    }

    unsafe fn ots_seed_jar_transfer_seed_out_for_address(
        &self,
        address: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let address = unsafe { read_str(address) };
            let position = st.jar_position(|seed, _| seed.wallet().address() == address);
            st.jar_transfer_out(position)
        })
    }

    unsafe fn ots_seed_jar_clear(&self) -> *mut ots_result_t {
        call!(self, |st| {
            let entries: Vec<JarEntry> = st.jar.drain(..).collect();
            for entry in entries {
                st.wipe_jar_entry(entry);
            }
            Ok(Payload::Boolean(true))
        })
    }

    unsafe fn ots_seed_jar_seeds(&self) -> *mut ots_result_t {
        call!(self, |st| {
            let items = st.jar.iter().map(|e| (OTS_HANDLE_SEED, e.object)).collect();
            Ok(Payload::Handles {
                items,
                reference: true,
            })
        })
    }

    unsafe fn ots_seed_jar_seed_count(&self) -> *mut ots_result_t {
        call!(self, |st| { Ok(Payload::Number(st.jar.len() as i64)) })
    }

    unsafe fn ots_seed_jar_seed_for_index(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| { st.jar_lookup(st.jar_index(index)) })
    }

    unsafe fn ots_seed_jar_seed_for_fingerprint(
        &self,
        fingerprint: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let fingerprint = unsafe { read_str(fingerprint) };
            st.jar_lookup(st.jar_position(|seed, _| seed.fingerprint() == fingerprint))
        })
    }

    unsafe fn ots_seed_jar_seed_for_address(&self, address: *const c_char) -> *mut ots_result_t {
        call!(self, |st| {
            let address = unsafe { read_str(address) };
            st.jar_lookup(st.jar_position(|seed, _| seed.wallet().address() == address))
        })
    }

    unsafe fn ots_seed_jar_seed_for_name(&self, name: *const c_char) -> *mut ots_result_t {
        call!(self, |st| {
            let name = unsafe { read_str(name) };
            st.jar_lookup(st.jar_position(|_, entry| entry.name == name))
        })
    }

    unsafe fn ots_seed_jar_seed_name(&self, seed: *const ots_handle_t) -> *mut ots_result_t {
        call!(self, |st| {
            let object = unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?;
            let position = st.jar_slot(object).ok_or_else(|| not_found("Seed is not in the jar"))?;
            Ok(Payload::Text(st.jar[position].name.clone()))
        })
    }

    unsafe fn ots_seed_jar_seed_rename(
        &self,
        seed: *const ots_handle_t,
        name: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |st| {
            let object = unsafe { st.lookup(seed, OTS_HANDLE_SEED) }?;
            let position = st.jar_slot(object).ok_or_else(|| not_found("Seed is not in the jar"))?;
            st.jar[position].name = unsafe { read_str(name) };
            Ok(Payload::Boolean(true))
        })
    }

    unsafe fn ots_seed_jar_item_name(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| { Ok(Payload::Text(st.jar_item(index)?.1)) })
    }

    unsafe fn ots_seed_jar_item_fingerprint(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| { Ok(Payload::Text(st.jar_item(index)?.0.fingerprint())) })
    }

    unsafe fn ots_seed_jar_item_address(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| {
            let address = st.jar_item(index)?.0.wallet().address();
            Ok(st.new_address(address))
        })
    }

    unsafe fn ots_seed_jar_item_address_string(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| { Ok(Payload::Text(st.jar_item(index)?.0.wallet().address())) })
    }

    unsafe fn ots_seed_jar_item_seed_type(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| { Ok(Payload::SeedType(st.jar_item(index)?.0.seed_type)) })
    }

    unsafe fn ots_seed_jar_item_seed_type_string(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| {
            let name = match st.jar_item(index)?.0.seed_type {
                OTS_SEED_TYPE_POLYSEED => "polyseed",
                _ => "monero",
            };
            Ok(Payload::Text(name.to_string()))
        })
    }

    unsafe fn ots_seed_jar_item_is_legacy(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| { Ok(Payload::Boolean(st.jar_item(index)?.0.legacy)) })
    }

    unsafe fn ots_seed_jar_item_network(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| { Ok(Payload::Network(st.jar_item(index)?.0.network)) })
    }

    unsafe fn ots_seed_jar_item_network_string(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| {
            let name = match st.jar_item(index)?.0.network {
                OTS_NETWORK_TEST => "test",
                OTS_NETWORK_STAGE => "stage",
                _ => "main",
            };
            Ok(Payload::Text(name.to_string()))
        })
    }

    unsafe fn ots_seed_jar_item_height(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| { Ok(Payload::Number(st.jar_item(index)?.0.height as i64)) })
    }

    unsafe fn ots_seed_jar_item_timestamp(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| { Ok(Payload::Number(st.jar_item(index)?.0.timestamp as i64)) })
    }

    unsafe fn ots_seed_jar_item_wallet(&self, index: usize) -> *mut ots_result_t {
        call!(self, |st| {
            let position = st.jar_index(index)?;
            Ok(reference(OTS_HANDLE_WALLET, st.jar_wallet(position)))
        })
    }

    unsafe fn ots_version(&self) -> *mut ots_result_t {
        call!(self, |_st| { Ok(Payload::Text("0.1.0".to_string())) })
    }

    unsafe fn ots_version_components(&self) -> *mut ots_result_t {
        call!(self, |_st| { Ok(Payload::Ints(vec![0, 1, 0])) })
    }

    unsafe fn ots_height_from_timestamp(
        &self,
        timestamp: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t {
        call!(self, |_st| {
            let network = check_network(network)?;
            Ok(Payload::Number(height_from_timestamp(timestamp, network) as i64))
        })
    }

    unsafe fn ots_timestamp_from_height(
        &self,
        height: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t {
        call!(self, |_st| {
            let network = check_network(network)?;
            Ok(Payload::Number(timestamp_from_height(height, network) as i64))
        })
    }

    unsafe fn ots_random_bytes(&self, size: usize) -> *mut ots_result_t {
        call!(self, |st| {
            let random = st.next_random(size);
            st.check_entropy(&random)?;
            Ok(Payload::Bytes(random, OTS_DATA_UINT8))
        })
    }

    unsafe fn ots_random_32(&self) -> *mut ots_result_t {
        call!(self, |st| {
            let random = st.next_random(32);
            st.check_entropy(&random)?;
            Ok(Payload::Bytes(random, OTS_DATA_UINT8))
        })
    }

    unsafe fn ots_check_low_entropy(
        &self,
        data: *const u8,
        size: usize,
        min_entropy: f64,
    ) -> *mut ots_result_t {
        call!(self, |_st| {
            let data = unsafe { read_bytes(data as *const c_char, size) };
            Ok(Payload::Boolean(entropy(&data) < min_entropy))
        })
    }

    unsafe fn ots_entropy_level(&self, data: *const u8, size: usize) -> *mut ots_result_t {
        call!(self, |_st| {
            let data = unsafe { read_bytes(data as *const c_char, size) };
            Ok(Payload::Text(format!("{:.2}", entropy(&data))))
        })
    }

    unsafe fn ots_set_enforce_entropy(&self, enforce: bool) {
        self.state.borrow_mut().settings.enforce_entropy = enforce;
    }

    unsafe fn ots_set_enforce_entropy_level(&self, level: f64) {
        self.state.borrow_mut().settings.entropy_level = level;
    }

    unsafe fn ots_set_max_account_depth(&self, depth: u32) {
        self.state.borrow_mut().settings.max_account_depth = depth;
    }

    unsafe fn ots_set_max_index_depth(&self, depth: u32) {
        self.state.borrow_mut().settings.max_index_depth = depth;
    }

    unsafe fn ots_set_max_depth(&self, account_depth: u32, index_depth: u32) {
        let mut state = self.state.borrow_mut();
        state.settings.max_account_depth = account_depth;
        state.settings.max_index_depth = index_depth;
    }

    unsafe fn ots_reset_max_depth(&self) {
        let mut state = self.state.borrow_mut();
        state.settings.max_account_depth = DEFAULT_MAX_ACCOUNT_DEPTH;
        state.settings.max_index_depth = DEFAULT_MAX_INDEX_DEPTH;
    }

    unsafe fn ots_get_max_account_depth(&self, depth: u32) -> u32 {
        self.state.borrow().depths(depth, 1).0
    }

    unsafe fn ots_get_max_index_depth(&self, depth: u32) -> u32 {
        self.state.borrow().depths(1, depth).1
    }

    unsafe fn ots_verify_data(
        &self,
        data: *const c_char,
        data_size: usize,
        address: *const c_char,
        signature_: *const c_char,
    ) -> *mut ots_result_t {
        call!(self, |_st| {
            let data = unsafe { read_bytes(data, data_size) };
            let address = parse_address(&unsafe { read_str(address) })?;
            let given = unsafe { read_str(signature_) };
            Ok(Payload::Boolean(verify(&address.text, &data, &given, true)))
        })
    }
}

fn verify(address: &str, data: &[u8], given: &str, legacy_fallback: bool) -> bool {
    given == signature(address, data, "SigV2")
        || (legacy_fallback && given == signature(address, data, "SigV1"))
}

fn not_integrated() -> FakeError {
    FakeError::new(
        ERROR_NOT_INTEGRATED,
        "ots::exception::address::NotIntegrated",
        "Address is not integrated",
    )
}

fn invalid_tx() -> FakeError {
    FakeError::new(
        ERROR_INVALID_TX,
        "ots::exception::transaction::Invalid",
        "Invalid unsigned transaction",
    )
}
