//! Vehicle slice: the owner's vehicles and the mechanic directory.

use crate::mvi::{Reducer, Slice};

use super::models::{Mechanic, PageCursor, Vehicle};
use super::replace_where;
use super::transition::Transition;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleState {
    pub vehicles: Vec<Vehicle>,
    pub mechanics: Vec<Mechanic>,
    pub mechanics_cursor: PageCursor,
}

impl Slice for VehicleState {}

pub struct VehicleReducer;

impl Reducer for VehicleReducer {
    type State = VehicleState;
    type Message = Transition;

    fn reduce(state: Self::State, message: &Self::Message) -> Self::State {
        match message {
            Transition::FetchedVehicles(vehicles) => VehicleState {
                vehicles: vehicles.clone(),
                ..state
            },
            Transition::FetchedMechanics { mechanics, cursor } => VehicleState {
                mechanics: mechanics.clone(),
                mechanics_cursor: cursor.clone(),
                ..state
            },
            Transition::RefreshedLocation { car_id, location } => VehicleState {
                vehicles: replace_where(
                    state.vehicles,
                    |vehicle| &vehicle.uuid == car_id,
                    |vehicle| Vehicle {
                        vehicle_location: Some(location.clone()),
                        ..vehicle
                    },
                ),
                ..state
            },
            _ => state,
        }
    }
}
