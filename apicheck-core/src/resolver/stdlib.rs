//! Built-in table of well-known standard-library declarations.
//!
//! Each package is written as Go source and parsed once, on first use, into
//! a [`PackageResolver`] with [`Origin::Stdlib`](super::Origin::Stdlib).

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::PackageResolver;
use crate::parser::parse_source;

const SOURCES: &[(&str, &str)] = &[
    (
        "errors",
        r#"package errors

func New(text string) error
func Is(err, target error) bool
func As(err error, target any) bool
func Unwrap(err error) error
func Join(errs ...error) error
"#,
    ),
    (
        "fmt",
        r#"package fmt

type Stringer interface {
	String() string
}

type GoStringer interface {
	GoString() string
}

func Errorf(format string, a ...any) error
func Sprintf(format string, a ...any) string
func Sprint(a ...any) string
func Sprintln(a ...any) string
"#,
    ),
    (
        "io",
        r#"package io

import "errors"

type Reader interface {
	Read(p []byte) (n int, err error)
}

type Writer interface {
	Write(p []byte) (n int, err error)
}

type Closer interface {
	Close() error
}

type Seeker interface {
	Seek(offset int64, whence int) (int64, error)
}

type ReadWriter interface {
	Reader
	Writer
}

type ReadCloser interface {
	Reader
	Closer
}

type WriteCloser interface {
	Writer
	Closer
}

type ReadWriteCloser interface {
	Reader
	Writer
	Closer
}

type ReadSeeker interface {
	Reader
	Seeker
}

type ReadSeekCloser interface {
	Reader
	Seeker
	Closer
}

type WriteSeeker interface {
	Writer
	Seeker
}

type ReadWriteSeeker interface {
	Reader
	Writer
	Seeker
}

type ReaderFrom interface {
	ReadFrom(r Reader) (n int64, err error)
}

type WriterTo interface {
	WriteTo(w Writer) (n int64, err error)
}

type ReaderAt interface {
	ReadAt(p []byte, off int64) (n int, err error)
}

type WriterAt interface {
	WriteAt(p []byte, off int64) (n int, err error)
}

type ByteReader interface {
	ReadByte() (byte, error)
}

type ByteScanner interface {
	ByteReader
	UnreadByte() error
}

type ByteWriter interface {
	WriteByte(c byte) error
}

type RuneReader interface {
	ReadRune() (r rune, size int, err error)
}

type RuneScanner interface {
	RuneReader
	UnreadRune() error
}

type StringWriter interface {
	WriteString(s string) (n int, err error)
}

var EOF = errors.New("EOF")
var ErrUnexpectedEOF = errors.New("unexpected EOF")
var Discard Writer

func NopCloser(r Reader) ReadCloser
func ReadAll(r Reader) ([]byte, error)
func MultiReader(readers ...Reader) Reader
func MultiWriter(writers ...Writer) Writer
"#,
    ),
    (
        "sort",
        r#"package sort

type Interface interface {
	Len() int
	Less(i, j int) bool
	Swap(i, j int)
}
"#,
    ),
    (
        "time",
        r#"package time

type Duration int64

type Time struct {
	wall uint64
	ext  int64
}

type Month int

type Weekday int

type Location struct {
	name string
}

const (
	Nanosecond  Duration = 1
	Microsecond          = 1000 * Nanosecond
	Millisecond          = 1000 * Microsecond
	Second               = 1000 * Millisecond
	Minute               = 60 * Second
	Hour                 = 60 * Minute
)

var UTC *Location
var Local *Location

func Now() Time
func Since(t Time) Duration
func Unix(sec int64, nsec int64) Time
"#,
    ),
    (
        "context",
        r#"package context

import (
	"errors"
	"time"
)

type Context interface {
	Deadline() (deadline time.Time, ok bool)
	Done() <-chan struct{}
	Err() error
	Value(key any) any
}

type CancelFunc func()

var Canceled = errors.New("context canceled")

func Background() Context
func TODO() Context
"#,
    ),
    (
        "net/http",
        r#"package http

import "errors"

type Header map[string][]string

type Request struct {
	Method string
	Header Header
}

type Response struct {
	StatusCode int
	Header     Header
}

type Client struct{}

type Server struct {
	Addr    string
	Handler Handler
}

type Handler interface {
	ServeHTTP(ResponseWriter, *Request)
}

type ResponseWriter interface {
	Header() Header
	Write([]byte) (int, error)
	WriteHeader(statusCode int)
}

type Flusher interface {
	Flush()
}

type RoundTripper interface {
	RoundTrip(*Request) (*Response, error)
}

type HandlerFunc func(ResponseWriter, *Request)

var DefaultClient = &Client{}
var ErrServerClosed = errors.New("http: Server closed")

func NewServeMux() *ServeMux

type ServeMux struct{}
"#,
    ),
    (
        "encoding/json",
        r#"package json

type Marshaler interface {
	MarshalJSON() ([]byte, error)
}

type Unmarshaler interface {
	UnmarshalJSON([]byte) error
}

type RawMessage []byte

type Number string

func Marshal(v any) ([]byte, error)
func Unmarshal(data []byte, v any) error
"#,
    ),
    (
        "encoding",
        r#"package encoding

type TextMarshaler interface {
	MarshalText() (text []byte, err error)
}

type TextUnmarshaler interface {
	UnmarshalText(text []byte) error
}

type BinaryMarshaler interface {
	MarshalBinary() (data []byte, err error)
}

type BinaryUnmarshaler interface {
	UnmarshalBinary(data []byte) error
}
"#,
    ),
    (
        "flag",
        r#"package flag

type Value interface {
	String() string
	Set(string) error
}

type Getter interface {
	Value
	Get() any
}
"#,
    ),
    (
        "hash",
        r#"package hash

import "io"

type Hash interface {
	io.Writer
	Sum(b []byte) []byte
	Reset()
	Size() int
	BlockSize() int
}

type Hash32 interface {
	Hash
	Sum32() uint32
}

type Hash64 interface {
	Hash
	Sum64() uint64
}
"#,
    ),
    (
        "sync",
        r#"package sync

type Locker interface {
	Lock()
	Unlock()
}

type Mutex struct {
	state int32
}

type RWMutex struct {
	w Mutex
}

type WaitGroup struct {
	state uint64
}

type Once struct {
	done uint32
}
"#,
    ),
    (
        "bytes",
        r#"package bytes

type Buffer struct {
	buf []byte
}

func NewBuffer(buf []byte) *Buffer
func NewBufferString(s string) *Buffer
"#,
    ),
    (
        "strings",
        r#"package strings

type Builder struct {
	buf []byte
}

type Reader struct {
	s string
}

func NewReader(s string) *Reader
func Join(elems []string, sep string) string
"#,
    ),
];

static PACKAGES: Lazy<HashMap<&'static str, PackageResolver>> = Lazy::new(|| {
    SOURCES
        .iter()
        .filter_map(|(path, source)| {
            let file_name = format!("$GOROOT/src/{}/decls.go", path);
            match parse_source(source, &file_name) {
                Ok(file) => Some((*path, PackageResolver::stdlib(path, &[file]))),
                Err(e) => {
                    tracing::error!("Built-in declarations for {} failed to parse: {}", path, e);
                    None
                }
            }
        })
        .collect()
});

/// Resolver for a standard-library package in the table.
pub fn lookup(path: &str) -> Option<&'static PackageResolver> {
    PACKAGES.get(path)
}

/// Import paths covered by the table.
pub fn packages() -> Vec<&'static str> {
    let mut paths: Vec<&'static str> = PACKAGES.keys().copied().collect();
    paths.sort_unstable();
    paths
}
