#![recursion_limit = "1024"]

pub mod worker;

use toner::cost::CHANNELS;
use toner::Costs;
use yew::prelude::*;
use yew::services::reader::{File, FileData, ReaderService, ReaderTask};
use yew::worker::{Bridge, Bridged};
use yew::ChangeData;

enum Outcome {
    Nothing,
    Estimate(worker::EstimateData),
    Failed(String),
}

pub struct Model {
    link: ComponentLink<Self>,
    tasks: Vec<ReaderTask>,
    worker: Box<dyn Bridge<worker::Worker>>,
    computing: bool,
    data: Option<FileData>,
    prices: [String; 4],
    outcome: Outcome,
}

pub enum Msg {
    Open(Vec<File>),
    Opened(FileData),
    UpdatePrice(usize, String),
    Compute,
    ResultComputed(worker::Response),
}

fn parse_prices(prices: &[String; 4]) -> Option<Costs> {
    let mut values = [0.0; 4];

    for (value, price) in values.iter_mut().zip(prices.iter()) {
        *value = price.trim().parse::<f64>().ok()?;
    }

    Some(Costs::new(values[0], values[1], values[2], values[3]))
}

fn view_estimate(data: &worker::EstimateData) -> Html {
    let usage = data.estimate.usage.fractions();

    html! {
        <div>
            <p>{ format!("{} x {} pixels", data.width, data.height) }</p>
            <p>{ format!("Total cost: {}", data.estimate.total_cost) }</p>
            <ul>
            {
                CHANNELS.iter().zip(usage.iter()).map(|(channel, fraction)| html! {
                    <li>{ format!("{}: {:.2}%", channel, fraction * 100.0) }</li>
                }).collect::<Html>()
            }
            </ul>
        </div>
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_: Self::Properties, link: ComponentLink<Self>) -> Self {
        let callback = link.callback(|r| Msg::ResultComputed(r));
        let worker = worker::Worker::bridge(callback);

        Self {
            link,
            tasks: vec![],
            worker,
            computing: false,
            data: None,
            prices: Default::default(),
            outcome: Outcome::Nothing,
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::Open(files) => {
                for file in files.into_iter() {
                    let callback = self.link.callback(Msg::Opened);

                    match ReaderService::read_file(file, callback) {
                        Ok(task) => self.tasks.push(task),
                        Err(err) => {
                            let message = format!("Could not read file: {}", err);
                            self.outcome = Outcome::Failed(message);
                            return true;
                        }
                    }
                }

                return false;
            }
            Msg::Opened(data) => {
                self.data = Some(data);
                return true;
            }
            Msg::UpdatePrice(index, price) => {
                self.prices[index] = price;
                return false;
            }
            Msg::Compute => {
                self.compute();
                return true;
            }
            Msg::ResultComputed(response) => {
                self.outcome = match response {
                    worker::Response::Estimate(data) => Outcome::Estimate(data),
                    worker::Response::Failed(message) => Outcome::Failed(message),
                };
                self.computing = false;
                return true;
            }
        }
    }

    fn change(&mut self, _props: Self::Properties) -> ShouldRender {
        false
    }

    fn view(&self) -> Html {
        html! {
            <div>
                <input type="file" accept="image/*" onchange=self.link.callback(move |value| {
                    let mut result = Vec::new();

                    if let ChangeData::Files(files) = value {
                        let files = js_sys::try_iter(&files)
                            .ok()
                            .flatten()
                            .into_iter()
                            .flatten()
                            .filter_map(|v| v.ok())
                            .map(File::from);

                        result.extend(files);
                    }

                    Msg::Open(result)
                })/>

                {
                    CHANNELS.iter().enumerate().map(|(index, channel)| html! {
                        <div>
                            <input type="text"
                                id=channel.to_string()
                                placeholder="0.0"
                                disabled=self.computing
                                onchange=self.link.callback(move |value| {
                                if let ChangeData::Value(value) = value {
                                    return Msg::UpdatePrice(index, value);
                                }

                                Msg::UpdatePrice(index, String::new())
                            })/>
                            <label for=channel.to_string()>{ *channel }</label>
                        </div>
                    }).collect::<Html>()
                }

                <button
                    disabled={ self.computing || self.data.is_none() }
                    onclick=self.link.callback(|_| Msg::Compute)>
                    { "Calculate" }
                </button>

                {
                    match &self.outcome {
                        Outcome::Nothing => html! {},
                        Outcome::Estimate(data) => view_estimate(data),
                        Outcome::Failed(message) => html! { <p>{ message }</p> },
                    }
                }
            </div>
        }
    }
}

impl Model {
    fn compute(&mut self) {
        if self.computing {
            return;
        }

        let costs = match parse_prices(&self.prices) {
            Some(costs) => costs,
            None => {
                self.outcome = Outcome::Failed("Invalid cartridge price".to_string());
                return;
            }
        };

        if let Some(data) = self.data.as_ref() {
            let data = worker::ComputeData {
                data: data.content.clone(),
                costs,
            };

            self.worker.send(worker::Request::Compute(data));
            self.computing = true;
        }
    }
}
