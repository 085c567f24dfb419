use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typegram_parser::{Parser, ParserOptions};

// Declaration-heavy source exercising the type grammar.
const DECLARATIONS_SOURCE: &str = r#"
interface User {
    readonly id: number;
    name: string;
    email?: string;
    tags: readonly string[];
    [key: string]: unknown;
}

type UserId = User["id"];
type Getters<T> = { [K in keyof T as `get${Capitalize<string & K>}`]: () => T[K] };
type Unwrap<T> = T extends Promise<infer U extends object> ? Unwrap<U> : T;
type Pair = [first: string, second?: number, ...rest: boolean[]];
type Ctor = abstract new (...args: any[]) => object;
type Guard = (value: unknown) => value is User;

declare module "storage" {
    export function load<T>(key: string): T | undefined;
    export const version: string;
}

declare global {
    interface Window { users: Map<UserId, User>; }
}

namespace App.Services {
    export enum Level { Low = 1, High = Low << 2 }
    export const enum Mode { Read, Write }
}

abstract class Repository<in out T extends { id: number }> implements Iterable<T> {
    private static count = 0;
    protected abstract readonly kind: string;
    #items = new Map<number, T>();

    constructor(private readonly name: string, public limit?: number) {}

    get size(): number {
        return this.#items.size;
    }

    find(id: number): T | undefined {
        return this.#items.get(id);
    }

    abstract [Symbol.iterator](): Iterator<T>;
}

function assertUser(value: unknown): asserts value is User {
    if (typeof value !== "object") throw new TypeError("not a user");
}

const pick = <T, K extends keyof T>(source: T, keys: K[]): Pick<T, K> => {
    return keys.reduce((out, key) => ({ ...out, [key]: source[key] }), {} as Pick<T, K>);
};

const settings = { retries: 3, backoff: [100, 200] } as const satisfies Record<string, unknown>;
export { pick, settings };
export type { UserId, Pair };
export default Repository;
"#;

const STANDALONE_TYPE: &str =
    "{ readonly [K in keyof T]?: T[K] extends (infer U)[] ? U | undefined : T[K] extends Function ? never : T[K] }";

fn bench_parse_declarations(c: &mut Criterion) {
    c.bench_function("parse_declarations", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let parser = Parser::new(&arena, "bench.ts", black_box(DECLARATIONS_SOURCE));
            black_box(parser.parse_source_file().ok().map(|file| file.statements.len()));
        });
    });
}

fn bench_parse_declaration_file(c: &mut Criterion) {
    c.bench_function("parse_declarations_ambient", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let options = ParserOptions::for_file("bench.d.ts");
            let parser = Parser::with_options(&arena, "bench.d.ts", black_box(AMBIENT_SOURCE), options);
            black_box(parser.parse_source_file().ok().map(|file| file.statements.len()));
        });
    });
}

const AMBIENT_SOURCE: &str = r#"
declare function overload(x: string): string;
declare function overload(x: number): number;
declare let counter: number;
declare class Widget<T = {}> {
    constructor(options: Partial<T>);
    render(): void;
    static create<T>(): Widget<T>;
}
export = Widget;
"#;

fn bench_parse_standalone_type(c: &mut Criterion) {
    c.bench_function("parse_standalone_type", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let parser = Parser::new(&arena, "type.ts", black_box(STANDALONE_TYPE));
            black_box(parser.parse_standalone_type().is_ok());
        });
    });
}

criterion_group!(benches, bench_parse_declarations, bench_parse_declaration_file, bench_parse_standalone_type);
criterion_main!(benches);
