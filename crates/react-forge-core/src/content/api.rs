//! API client modules
//!
//! The four API choices are variants in [`API_VARIANTS`]: a transport
//! (axios instance or fetch wrapper) and whether React Query sits on top.
//! Every variant gets `api/client` and `api/posts`; React Query variants add
//! a shared `queryClient` and a `usePosts` hook.

use super::lib_module;
use crate::choices::{ApiClient, ChoiceSchema};
use crate::files::SourceFileSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Axios,
    Fetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVariant {
    pub api: ApiClient,
    pub transport: Transport,
    pub react_query: bool,
}

pub const API_VARIANTS: &[ApiVariant] = &[
    ApiVariant {
        api: ApiClient::AxiosReactQuery,
        transport: Transport::Axios,
        react_query: true,
    },
    ApiVariant {
        api: ApiClient::AxiosOnly,
        transport: Transport::Axios,
        react_query: false,
    },
    ApiVariant {
        api: ApiClient::FetchReactQuery,
        transport: Transport::Fetch,
        react_query: true,
    },
    ApiVariant {
        api: ApiClient::FetchOnly,
        transport: Transport::Fetch,
        react_query: false,
    },
];

pub fn variant(api: ApiClient) -> Option<&'static ApiVariant> {
    API_VARIANTS.iter().find(|v| v.api == api)
}

/// Expression reading the API base URL from the framework's public env
fn base_url(schema: &ChoiceSchema) -> &'static str {
    if schema.is_vite() {
        "import.meta.env.VITE_API_URL ?? 'https://jsonplaceholder.typicode.com'"
    } else {
        "process.env.NEXT_PUBLIC_API_URL ?? 'https://jsonplaceholder.typicode.com'"
    }
}

fn client(schema: &ChoiceSchema, transport: Transport) -> String {
    match transport {
        Transport::Axios => format!(
            "import axios from 'axios'\n\
             \n\
             export const apiClient = axios.create({{\n\
             \x20 baseURL: {},\n\
             \x20 headers: {{\n\
             \x20   'Content-Type': 'application/json',\n\
             \x20 }},\n\
             }})\n",
            base_url(schema)
        ),
        Transport::Fetch => {
            let (signature, result) = if schema.typescript {
                (
                    "export async function apiFetch<T>(path: string, init?: RequestInit): Promise<T> {",
                    "  return response.json() as Promise<T>",
                )
            } else {
                (
                    "export async function apiFetch(path, init) {",
                    "  return response.json()",
                )
            };
            format!(
                "const BASE_URL = {}\n\
                 \n\
                 {}\n\
                 \x20 const response = await fetch(`${{BASE_URL}}${{path}}`, {{\n\
                 \x20   ...init,\n\
                 \x20   headers: {{\n\
                 \x20     'Content-Type': 'application/json',\n\
                 \x20     ...init?.headers,\n\
                 \x20   }},\n\
                 \x20 }})\n\
                 \x20 if (!response.ok) {{\n\
                 \x20   throw new Error(`Request failed with status ${{response.status}}`)\n\
                 \x20 }}\n\
                 {}\n\
                 }}\n",
                base_url(schema),
                signature,
                result
            )
        }
    }
}

fn posts(schema: &ChoiceSchema, transport: Transport) -> String {
    let ts = schema.typescript;
    let mut lines = Vec::new();
    lines.push(match transport {
        Transport::Axios => "import { apiClient } from './client'",
        Transport::Fetch => "import { apiFetch } from './client'",
    });
    lines.push("");
    if ts {
        lines.push("export interface Post {\n  id: number\n  title: string\n  body: string\n}\n");
    }

    let function = match (transport, ts) {
        (Transport::Axios, true) => "export async function fetchPosts(): Promise<Post[]> {\n  const { data } = await apiClient.get<Post[]>('/posts')\n  return data\n}",
        (Transport::Axios, false) => "export async function fetchPosts() {\n  const { data } = await apiClient.get('/posts')\n  return data\n}",
        (Transport::Fetch, true) => "export function fetchPosts(): Promise<Post[]> {\n  return apiFetch<Post[]>('/posts')\n}",
        (Transport::Fetch, false) => "export function fetchPosts() {\n  return apiFetch('/posts')\n}",
    };
    lines.push(function);

    let mut body = lines.join("\n");
    body.push('\n');
    body
}

const QUERY_CLIENT: &str = r#"import { QueryClient } from '@tanstack/react-query'

export const queryClient = new QueryClient({
  defaultOptions: {
    queries: {
      staleTime: 60 * 1000,
      retry: 1,
    },
  },
})
"#;

const USE_POSTS: &str = r#"import { useQuery } from '@tanstack/react-query'
import { fetchPosts } from '../api/posts'

export function usePosts() {
  return useQuery({
    queryKey: ['posts'],
    queryFn: fetchPosts,
  })
}
"#;

pub fn emit(schema: &ChoiceSchema, files: &mut SourceFileSet) {
    let Some(variant) = variant(schema.api) else {
        return;
    };
    let ext = schema.script_ext();
    let path = |module: &str| format!("{}.{}", lib_module(schema, module), ext);

    files.insert(path("api/client"), client(schema, variant.transport));
    files.insert_with_refs(
        path("api/posts"),
        posts(schema, variant.transport),
        [path("api/client")],
    );

    if variant.react_query {
        files.insert(path("api/queryClient"), QUERY_CLIENT);
        files.insert_with_refs(path("hooks/usePosts"), USE_POSTS, [path("api/posts")]);
    }
}
