/// Update a [counter](fn@crate::counter)
///
/// The macro takes up to 3 parts separated by comma `,`:
/// - The update expression, either `counter += n` to increment the count,
///   or just `counter` to keep the count.
/// - Optional `force` to refresh even if `min_delta` has not passed.
/// - Optional `name = value` pairs to set user-defined fields.
///
/// , where `counter` is an ident. The increment can be any integer type. The macro
/// evaluates to a [`Result`](crate::Result), which is an error if the increment does not fit in `i64`.
///
/// # Examples
/// ```rust
/// # use pistonite_ga as ga;
/// # let manager = ga::StreamManager::new(ga::AnsiTerminal::new(false, Default::default()), std::io::sink()).into_arc();
/// let mut counter = ga::counter("Scanning")
///     .counter_format("{desc} {count} {file}{fill}")
///     .field("file", "")
///     .spawn(manager)?;
/// // increment the count
/// ga::update!(counter += 1)?;
/// // increment and refresh now
/// ga::update!(counter += 2, force)?;
/// // increment and set a field
/// ga::update!(counter += 1, file = "main.rs")?;
/// // set a field without changing the count
/// ga::update!(counter, file = "lib.rs")?;
/// assert_eq!(counter.count(), 4);
/// assert_eq!(counter.render(Some(20), None)?, "Scanning 4 lib.rs   ");
/// # Ok::<(), ga::Error>(())
/// ```
#[macro_export]
macro_rules! update {
    ($counter:ident += $incr:expr) => {
        match $crate::counter::__incr($incr) { Ok(incr) => $counter.update(incr), Err(e) => Err(e) }
    };
    ($counter:ident += $incr:expr, force) => {
        match $crate::counter::__incr($incr) { Ok(incr) => $counter.update_forced(incr), Err(e) => Err(e) }
    };
    ($counter:ident += $incr:expr, force, $($key:ident = $value:expr),+ $(,)?) => {
        match $crate::counter::__incr($incr) {
            Ok(incr) => $counter.update_with(incr, true, [$((stringify!($key), $crate::Value::from($value))),+]),
            Err(e) => Err(e),
        }
    };
    ($counter:ident += $incr:expr, $($key:ident = $value:expr),+ $(,)?) => {
        match $crate::counter::__incr($incr) {
            Ok(incr) => $counter.update_with(incr, false, [$((stringify!($key), $crate::Value::from($value))),+]),
            Err(e) => Err(e),
        }
    };
    ($counter:ident, force) => {
        $counter.update_forced(0)
    };
    ($counter:ident, $($key:ident = $value:expr),+ $(,)?) => {
        $counter.update_with(0, false, [$((stringify!($key), $crate::Value::from($value))),+])
    };
}

#[doc(hidden)]
pub fn __incr<T>(incr: T) -> crate::Result<i64>
where
    T: TryInto<i64> + Copy + std::fmt::Display,
{
    match incr.try_into() {
        Ok(x) => Ok(x),
        Err(_) => Err(crate::Error::InvalidState(format!(
            "increment {incr} does not fit in i64"
        ))),
    }
}
