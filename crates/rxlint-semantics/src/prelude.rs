//! Ambient declarations visible to every analysed file.

use rustc_hash::FxHashMap;
use rxlint_syntax::{SupportedLanguage, parse};

use crate::declaration::DeclarationModel;
use crate::error::SemanticsError;
use crate::types::{TypeId, TypeTable};

const RXJS_DECLARATIONS: &str = r"
interface Unsubscribable { unsubscribe(): void; }
interface Subscription extends Unsubscribable {
  closed: boolean;
  add(teardown: unknown): void;
  remove(teardown: unknown): void;
}
interface Observer<T> {
  next(value: T): void;
  error(err: unknown): void;
  complete(): void;
}
interface OperatorFunction<T, R> { (source: Observable<T>): Observable<R>; }
interface MonoTypeOperatorFunction<T> extends OperatorFunction<T, T> {}

interface Observable<T> {
  subscribe(observer?: unknown): Subscription;
  pipe(...operations: unknown[]): Observable<any>;
  forEach(next: (value: T) => void): Promise<void>;
  toPromise(): Promise<T | undefined>;
}
interface Subject<T> extends Observable<T> {
  observed: boolean;
  next(value: T): void;
  error(err: unknown): void;
  complete(): void;
  asObservable(): Observable<T>;
}
interface BehaviorSubject<T> extends Subject<T> {
  value: T;
  getValue(): T;
}
interface ReplaySubject<T> extends Subject<T> {}
interface AsyncSubject<T> extends Subject<T> {}
interface ConnectableObservable<T> extends Observable<T> {
  connect(): Subscription;
  refCount(): Observable<T>;
}
interface GroupedObservable<K, T> extends Observable<T> { key: K; }

interface Promise<T> {
  then(onfulfilled?: unknown, onrejected?: unknown): Promise<any>;
  catch(onrejected?: unknown): Promise<any>;
  finally(onfinally?: unknown): Promise<T>;
}

interface Action { type: string; }
interface Actions<V> extends Observable<V> {}
interface ActionsObservable<T> extends Observable<T> {}
interface StateObservable<S> extends Observable<S> { value: S; }

declare const EMPTY: Observable<never>;
declare const NEVER: Observable<never>;

declare function of<T>(...values: T[]): Observable<T>;
declare function from<T>(input: unknown): Observable<T>;
declare function defer<T>(factory: () => unknown): Observable<T>;
declare function timer(due: number, period?: number): Observable<number>;
declare function interval(period: number): Observable<number>;
declare function throwError(factory: unknown): Observable<never>;
declare function merge<T>(...sources: unknown[]): Observable<T>;
declare function concat<T>(...sources: unknown[]): Observable<T>;
declare function combineLatest<T>(...sources: unknown[]): Observable<T>;
declare function forkJoin<T>(...sources: unknown[]): Observable<T>;
declare function race<T>(...sources: unknown[]): Observable<T>;
declare function zip<T>(...sources: unknown[]): Observable<T>;
declare function fromEvent<T>(target: unknown, name: string): Observable<T>;
declare function lastValueFrom<T>(source: Observable<T>): Promise<T>;
declare function firstValueFrom<T>(source: Observable<T>): Promise<T>;

declare function take<T>(count: number): MonoTypeOperatorFunction<T>;
declare function first<T>(predicate?: unknown): MonoTypeOperatorFunction<T>;
declare function map<T, R>(project: (value: T) => R): OperatorFunction<T, R>;
declare function filter<T>(predicate: (value: T) => boolean): MonoTypeOperatorFunction<T>;
declare function tap<T>(observer?: unknown): MonoTypeOperatorFunction<T>;
declare function switchMap<T, R>(project: unknown): OperatorFunction<T, R>;
declare function mergeMap<T, R>(project: unknown): OperatorFunction<T, R>;
declare function concatMap<T, R>(project: unknown): OperatorFunction<T, R>;
declare function exhaustMap<T, R>(project: unknown): OperatorFunction<T, R>;
declare function catchError<T, R>(selector: unknown): OperatorFunction<T, R>;
declare function ofType<T>(...allowedTypes: string[]): MonoTypeOperatorFunction<T>;
";

/// Types and values every file can refer to without declaring them.
///
/// A prelude is built once per session and shared read-only between files.
/// Each file's model starts from a copy of the prelude's type table, so
/// [`TypeId`]s handed out by the prelude stay valid in every model.
#[derive(Debug, Clone, Default)]
pub struct Prelude {
    table: TypeTable,
    types: FxHashMap<String, TypeId>,
    values: FxHashMap<String, TypeId>,
}

impl Prelude {
    /// Returns a prelude with only the intrinsic types.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a prelude from TypeScript ambient declarations.
    ///
    /// Top-level interfaces, classes and type aliases become named types;
    /// top-level `declare const` and `declare function` bindings become
    /// named values.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticsError::Prelude`] when the parser cannot be created.
    pub fn from_source(source: &str) -> Result<Self, SemanticsError> {
        let tree = parse(source, SupportedLanguage::TypeScript)?;
        let (table, types, values) = DeclarationModel::bind_prelude(&tree, &Self::empty());
        Ok(Self {
            table,
            types,
            values,
        })
    }

    /// Returns the declarations for rxjs, NgRx `Actions` and
    /// redux-observable streams.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticsError::Prelude`] when the parser cannot be created.
    pub fn rxjs() -> Result<Self, SemanticsError> {
        Self::from_source(RXJS_DECLARATIONS)
    }

    /// Returns the table every prelude [`TypeId`] belongs to.
    #[must_use]
    pub const fn table(&self) -> &TypeTable {
        &self.table
    }

    /// Looks up a declared type by name.
    #[must_use]
    pub fn type_named(&self, name: &str) -> Option<&TypeId> {
        self.types.get(name)
    }

    /// Looks up a declared value by name.
    #[must_use]
    pub fn value_named(&self, name: &str) -> Option<&TypeId> {
        self.values.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeData;
    use rstest::rstest;

    #[rstest]
    #[case("Observable")]
    #[case("Subject")]
    #[case("BehaviorSubject")]
    #[case("Actions")]
    #[case("StateObservable")]
    fn rxjs_declares_stream_types(#[case] name: &str) {
        let prelude = Prelude::rxjs().expect("prelude");
        let id = prelude.type_named(name).copied().expect("declared");
        assert!(matches!(
            prelude.table().get(id),
            Some(TypeData::Declared(declared)) if declared.name == name
        ));
    }

    #[rstest]
    #[case("of")]
    #[case("interval")]
    #[case("take")]
    #[case("EMPTY")]
    fn rxjs_declares_values(#[case] name: &str) {
        let prelude = Prelude::rxjs().expect("prelude");
        assert!(prelude.value_named(name).is_some());
    }

    #[test]
    fn empty_prelude_has_only_intrinsics() {
        let prelude = Prelude::empty();
        assert!(prelude.type_named("Observable").is_none());
        assert!(prelude.value_named("of").is_none());
        assert_eq!(prelude.table().len(), TypeTable::new().len());
    }
}
