//! State management modules

use super::lib_module;
use crate::choices::{ChoiceSchema, StateManagement};
use crate::files::SourceFileSet;

fn redux_store(schema: &ChoiceSchema) -> String {
    let mut body = String::from(
        "import { configureStore } from '@reduxjs/toolkit'\n\
         import counterReducer from './counterSlice'\n\
         \n\
         export const store = configureStore({\n\
         \x20 reducer: {\n\
         \x20   counter: counterReducer,\n\
         \x20 },\n\
         })\n",
    );
    if schema.typescript {
        body.push_str(
            "\n\
             export type RootState = ReturnType<typeof store.getState>\n\
             export type AppDispatch = typeof store.dispatch\n",
        );
    }
    body
}

fn counter_slice(schema: &ChoiceSchema) -> String {
    if schema.typescript {
        r#"import { createSlice } from '@reduxjs/toolkit'
import type { PayloadAction } from '@reduxjs/toolkit'

interface CounterState {
  value: number
}

const initialState: CounterState = {
  value: 0,
}

export const counterSlice = createSlice({
  name: 'counter',
  initialState,
  reducers: {
    increment: (state) => {
      state.value += 1
    },
    decrement: (state) => {
      state.value -= 1
    },
    incrementByAmount: (state, action: PayloadAction<number>) => {
      state.value += action.payload
    },
  },
})

export const { increment, decrement, incrementByAmount } = counterSlice.actions

export default counterSlice.reducer
"#
        .to_string()
    } else {
        r#"import { createSlice } from '@reduxjs/toolkit'

const initialState = {
  value: 0,
}

export const counterSlice = createSlice({
  name: 'counter',
  initialState,
  reducers: {
    increment: (state) => {
      state.value += 1
    },
    decrement: (state) => {
      state.value -= 1
    },
    incrementByAmount: (state, action) => {
      state.value += action.payload
    },
  },
})

export const { increment, decrement, incrementByAmount } = counterSlice.actions

export default counterSlice.reducer
"#
        .to_string()
    }
}

fn zustand_store(schema: &ChoiceSchema) -> String {
    let (interface, create) = if schema.typescript {
        (
            "interface CounterState {\n  count: number\n  increment: () => void\n  decrement: () => void\n  reset: () => void\n}\n\n",
            "create<CounterState>()",
        )
    } else {
        ("", "create")
    };
    format!(
        "import {{ create }} from 'zustand'\n\
         \n\
         {interface}export const useCounterStore = {create}((set) => ({{\n\
         \x20 count: 0,\n\
         \x20 increment: () => set((state) => ({{ count: state.count + 1 }})),\n\
         \x20 decrement: () => set((state) => ({{ count: state.count - 1 }})),\n\
         \x20 reset: () => set({{ count: 0 }}),\n\
         }}))\n"
    )
}

pub fn emit(schema: &ChoiceSchema, files: &mut SourceFileSet) {
    let ext = schema.script_ext();
    match schema.state_management {
        StateManagement::Redux => {
            let slice = format!("{}.{}", lib_module(schema, "store/counterSlice"), ext);
            files.insert(slice.clone(), counter_slice(schema));
            files.insert_with_refs(
                format!("{}.{}", lib_module(schema, "store/index"), ext),
                redux_store(schema),
                [slice],
            );
        }
        StateManagement::Zustand => files.insert(
            format!("{}.{}", lib_module(schema, "store/useCounterStore"), ext),
            zustand_store(schema),
        ),
        StateManagement::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::NextRouter;
    use crate::test_support::{next_schema, vite_schema};

    #[test]
    fn test_redux_store_and_slice() {
        let schema = ChoiceSchema {
            typescript: true,
            state_management: StateManagement::Redux,
            ..vite_schema()
        };
        let mut files = SourceFileSet::new();
        emit(&schema, &mut files);

        let store = files.get("src/store/index.ts").unwrap();
        assert!(store.contains("configureStore"));
        assert!(store.contains("export type RootState"));
        assert_eq!(
            files.references("src/store/index.ts"),
            ["src/store/counterSlice.ts".to_string()]
        );
        assert!(files
            .get("src/store/counterSlice.ts")
            .unwrap()
            .contains("PayloadAction<number>"));
    }

    #[test]
    fn test_zustand_store_lives_in_lib_for_next() {
        let schema = ChoiceSchema {
            state_management: StateManagement::Zustand,
            ..next_schema(NextRouter::App)
        };
        let mut files = SourceFileSet::new();
        emit(&schema, &mut files);

        let store = files.get("lib/store/useCounterStore.js").unwrap();
        assert!(store.contains("export const useCounterStore = create((set) => ({"));
        assert!(!store.contains("interface"));
    }

    #[test]
    fn test_no_state_management_emits_nothing() {
        let mut files = SourceFileSet::new();
        emit(&vite_schema(), &mut files);
        assert!(files.is_empty());
    }
}
